// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Seam towards the radio transport that finds sources and reports their readings.

use crate::{RawReading, SourceId};
use futures::Stream;
use std::fmt;
use std::pin::Pin;
use tagflux_error::Result;

/// Per-source feed of "reading updated" notifications.
pub type ReadingStream = Pin<Box<dyn Stream<Item = RawReading> + Send + 'static>>;

/// Feed of "source found" notifications.
pub type FoundStream = Pin<Box<dyn Stream<Item = FoundSource> + Send + 'static>>;

/// A newly discovered source together with its private reading feed.
pub struct FoundSource {
    pub id: SourceId,
    pub readings: ReadingStream,
}

impl FoundSource {
    pub fn new<S>(id: impl Into<SourceId>, readings: S) -> Self
    where
        S: Stream<Item = RawReading> + Send + 'static,
    {
        Self {
            id: id.into(),
            readings: Box::pin(readings),
        }
    }
}

impl fmt::Debug for FoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoundSource")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Capability that reports sources as the transport discovers them.
///
/// Notifications are pushed through the returned stream; nothing is polled on the
/// device side. Implementations may fail once, at initialization, when the platform
/// or hardware is unavailable.
pub trait Discovery: Send + Sync + 'static {
    /// Starts listening and returns the feed of discovered sources.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::DiscoveryUnavailable` (or an external error) if the
    /// transport cannot be initialized.
    fn listen(&self) -> Result<FoundStream>;
}
