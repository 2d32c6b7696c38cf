// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Last stage of the pipeline: enabled records become deltas, the rest are dropped.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tagflux_core::{DeltaEvent, MeasurementRecord, Result, Rounding};

use crate::DeltaSink;

/// Builds a [`DeltaEvent`] for every enabled record and hands it to a [`DeltaSink`].
#[derive(Clone)]
pub struct EmissionFilter {
    plugin_id: String,
    source_prefix: String,
    rounding: Rounding,
    sink: Arc<dyn DeltaSink>,
}

impl EmissionFilter {
    pub fn new(
        plugin_id: impl Into<String>,
        source_prefix: impl Into<String>,
        rounding: Rounding,
        sink: Arc<dyn DeltaSink>,
    ) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            source_prefix: source_prefix.into(),
            rounding,
            sink,
        }
    }

    /// Emits `record` stamped with the current time.
    ///
    /// Returns `Ok(false)` when the record's source is disabled and nothing was sent.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error when delivery fails.
    pub fn emit(&self, record: &MeasurementRecord) -> Result<bool> {
        self.emit_at(record, Utc::now())
    }

    /// Same as [`emit`](Self::emit) with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error when delivery fails.
    pub fn emit_at(&self, record: &MeasurementRecord, timestamp: DateTime<Utc>) -> Result<bool> {
        if !record.enabled {
            debug!("dropping reading from disabled source {}", record.id);
            return Ok(false);
        }

        let delta = DeltaEvent::from_record(record, &self.source_prefix, &self.rounding, timestamp);
        if delta.values().next().is_none() {
            debug!("reading from {} carried no values", record.id);
        }

        self.sink
            .handle_message(&self.plugin_id, delta)
            .inspect_err(|error| warn!("delta for {} was not delivered: {}", record.id, error))?;
        Ok(true)
    }
}

impl fmt::Debug for EmissionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissionFilter")
            .field("plugin_id", &self.plugin_id)
            .field("source_prefix", &self.source_prefix)
            .field("rounding", &self.rounding)
            .finish_non_exhaustive()
    }
}
