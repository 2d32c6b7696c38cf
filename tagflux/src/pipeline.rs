// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One running instance of the reading pipeline.
//!
//! snapshots → seed default configs → merge feeds (warm-up dropped) → normalize with the
//! current config → emit enabled records.

use futures::{future, StreamExt};
use parking_lot::ReentrantMutex;
use std::sync::Arc;
use tagflux_core::{normalize, ConfigStore, NormalizeOptions, Result, SourceReading, TagfluxError};
use tagflux_exec::{EmissionFilter, SubscribeExt};
use tagflux_stream::{MergeSourcesExt, SourceRegistry, SourceSnapshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub(crate) struct Pipeline {
    cancel: CancellationToken,
    // Held across each hand-off to the sink and across cancellation. Reentrant so a sink
    // may stop or restart the plugin from inside its own delivery.
    gate: Arc<ReentrantMutex<()>>,
    task: JoinHandle<Result<()>>,
}

impl Pipeline {
    pub(crate) fn spawn(
        registry: &SourceRegistry,
        store: ConfigStore,
        options: NormalizeOptions,
        filter: EmissionFilter,
    ) -> Result<Self> {
        let seeding = store.clone();
        let readings = registry
            .subscribe()?
            .inspect(move |snapshot: &SourceSnapshot| {
                for source in snapshot.iter() {
                    if seeding.ensure_default(&source.id) {
                        debug!("seeded default configuration for {}", source.id);
                    }
                }
            })
            .merge_sources();

        let cancel = CancellationToken::new();
        let gate = Arc::new(ReentrantMutex::new(()));
        let emit_gate = Arc::clone(&gate);

        let task = tokio::spawn(readings.subscribe(
            move |reading: SourceReading, token: CancellationToken| {
                let config = store.get(&reading.id);
                let record = normalize(&config, &reading.reading, &options);

                let _open = emit_gate.lock();
                let result = if token.is_cancelled() {
                    Ok(())
                } else {
                    filter.emit(&record).map(|_| ())
                };
                future::ready(result)
            },
            |err: TagfluxError| warn!("reading was not delivered: {}", err),
            Some(cancel.clone()),
        ));

        Ok(Self { cancel, gate, task })
    }

    /// Stops delivery and releases every subscription held by the pipeline.
    ///
    /// Once this returns, no further delta reaches the sink.
    pub(crate) fn stop(self) {
        {
            let _closed = self.gate.lock();
            self.cancel.cancel();
        }
        self.task.abort();
    }
}
