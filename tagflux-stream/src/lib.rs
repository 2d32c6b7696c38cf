// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream plumbing between source discovery and the per-reading pipeline.
//!
//! # Overview
//!
//! - [`SourceRegistry`] folds "source found" notifications into an ever-growing
//!   [`SourceSnapshot`] and replays the latest snapshot to every new subscriber.
//! - [`ReadingFeed`] wraps one source's private reading stream as a lazily connected,
//!   multi-subscriber feed.
//! - [`MergeSourcesExt::merge_sources`] turns a stream of snapshots into a single stream
//!   of [`SourceReading`](tagflux_core::SourceReading)s, attaching each source exactly
//!   once and discarding its warm-up reading.
//! - [`SkipItemsExt::skip_items`] is the plain "drop the first n" operator used for the
//!   warm-up.
//!
//! # Example
//!
//! ```
//! use futures::{stream, StreamExt};
//! use tagflux_core::{FoundSource, RawReading};
//! use tagflux_stream::{MergeSourcesExt, SourceRegistry};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let readings = stream::iter(vec![
//!     RawReading::raw().with_humidity(10.0),
//!     RawReading::raw().with_humidity(20.0),
//! ]);
//! let registry = SourceRegistry::spawn(stream::iter(vec![FoundSource::new("c4a1d2", readings)]));
//!
//! let mut merged = registry.subscribe().unwrap().merge_sources();
//! let first = merged.next().await.unwrap();
//! assert_eq!(first.reading.humidity, Some(20.0));
//! registry.close();
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;
pub mod merge_sources;
pub mod reading_feed;
pub mod skip_items;
pub mod source_registry;

pub use merge_sources::{MergeSources, MergeSourcesExt, WARM_UP_READINGS};
pub use reading_feed::{FeedSubscription, ReadingFeed};
pub use skip_items::SkipItemsExt;
pub use source_registry::{SnapshotStream, Source, SourceRegistry, SourceSnapshot};
