// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the tagflux crates.
//!
//! This crate is for development and testing only.
//!
//! # Key Types
//!
//! - [`MockDiscovery`] stands in for the radio transport. Tests announce sources through
//!   its [`DiscoveryHandle`] and push readings through the returned [`ReadingSender`].
//! - [`RecordingSink`] collects emitted deltas for later inspection.
//! - [`fixtures`] holds ready-made ids and readings.
//! - [`helpers`] holds timeout-bounded assertions for streams.
//!
//! # Example
//!
//! ```rust
//! use tagflux_core::Discovery;
//! use tagflux_test_utils::{fixtures, MockDiscovery};
//!
//! let (discovery, handle) = MockDiscovery::new();
//! let found = discovery.listen().unwrap();
//! let galley = handle.found(fixtures::galley_id());
//! galley.send(fixtures::cabin_reading()).unwrap();
//! # drop(found);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fixtures;
pub mod helpers;
pub mod mock_discovery;
pub mod recording_sink;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream};
pub use mock_discovery::{DiscoveryHandle, MockDiscovery, ReadingSender};
pub use recording_sink::RecordingSink;

/// Creates an unbounded channel whose receiving half is a `Stream`.
///
/// # Example
///
/// ```rust
/// use tagflux_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
/// tx.send(7).unwrap();
/// assert_eq!(stream.next().await, Some(7));
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
