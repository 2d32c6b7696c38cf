// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Host-side receiver of emitted deltas.

use tagflux_core::{DeltaEvent, Result, TagfluxError};
use tokio::sync::mpsc;

/// Receives every delta the pipeline emits, tagged with the emitting plugin's id.
///
/// Implemented for closures `Fn(&str, DeltaEvent)` and for unbounded Tokio senders of
/// `DeltaEvent`.
///
/// A sink may call back into the plugin that owns it, including stopping or restarting
/// it, from inside `handle_message`.
pub trait DeltaSink: Send + Sync + 'static {
    /// Delivers one delta.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::ChannelSendError` when the receiving side is gone.
    fn handle_message(&self, plugin_id: &str, delta: DeltaEvent) -> Result<()>;
}

impl<F> DeltaSink for F
where
    F: Fn(&str, DeltaEvent) + Send + Sync + 'static,
{
    fn handle_message(&self, plugin_id: &str, delta: DeltaEvent) -> Result<()> {
        self(plugin_id, delta);
        Ok(())
    }
}

impl DeltaSink for mpsc::UnboundedSender<DeltaEvent> {
    fn handle_message(&self, _plugin_id: &str, delta: DeltaEvent) -> Result<()> {
        self.send(delta).map_err(|_| TagfluxError::ChannelSendError)
    }
}
