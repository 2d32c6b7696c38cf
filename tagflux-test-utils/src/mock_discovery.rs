// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Channel-driven stand-in for the radio transport.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tagflux_core::{Discovery, FoundSource, FoundStream, RawReading, Result, SourceId, TagfluxError};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Pushes readings into one announced source.
pub type ReadingSender = mpsc::UnboundedSender<RawReading>;

enum Mode {
    Ready(Mutex<Option<mpsc::UnboundedReceiver<FoundSource>>>),
    Failing(String),
}

/// A [`Discovery`] whose sources are announced by the test through a
/// [`DiscoveryHandle`].
///
/// `listen` hands out the feed of found sources once; a second call fails with
/// `TagfluxError::InvalidState`.
pub struct MockDiscovery {
    mode: Mode,
    listens: Arc<AtomicUsize>,
}

impl MockDiscovery {
    pub fn new() -> (Self, DiscoveryHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let listens = Arc::new(AtomicUsize::new(0));
        (
            Self {
                mode: Mode::Ready(Mutex::new(Some(rx))),
                listens: Arc::clone(&listens),
            },
            DiscoveryHandle { found: tx, listens },
        )
    }

    /// A transport that fails to initialize with `TagfluxError::DiscoveryUnavailable`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            mode: Mode::Failing(reason.into()),
            listens: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `listen` has been called.
    pub fn listen_count(&self) -> usize {
        self.listens.load(Ordering::SeqCst)
    }
}

impl Discovery for MockDiscovery {
    fn listen(&self) -> Result<FoundStream> {
        self.listens.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            Mode::Failing(reason) => Err(TagfluxError::discovery_unavailable(reason.clone())),
            Mode::Ready(receiver) => receiver
                .lock()
                .take()
                .map(|rx| Box::pin(UnboundedReceiverStream::new(rx)) as FoundStream)
                .ok_or_else(|| TagfluxError::invalid_state("mock discovery is already listening")),
        }
    }
}

/// Test-side controller for a [`MockDiscovery`].
///
/// Dropping the handle ends the feed of found sources.
pub struct DiscoveryHandle {
    found: mpsc::UnboundedSender<FoundSource>,
    listens: Arc<AtomicUsize>,
}

impl DiscoveryHandle {
    /// Announces a source and returns the sender for its readings.
    ///
    /// Announcing after the discovery side has gone away is silently ignored.
    pub fn found(&self, id: SourceId) -> ReadingSender {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = self
            .found
            .send(FoundSource::new(id, UnboundedReceiverStream::new(rx)));
        tx
    }

    /// Number of times `listen` has been called on the paired discovery.
    pub fn listen_count(&self) -> usize {
        self.listens.load(Ordering::SeqCst)
    }
}
