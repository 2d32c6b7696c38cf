// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Dynamic fan-in of per-source reading feeds.
//!
//! [`MergeSourcesExt::merge_sources`] consumes a stream of [`SourceSnapshot`]s and
//! produces one interleaved stream of [`SourceReading`]s. Each snapshot is compared
//! against the sources already attached; only sources not seen before are subscribed,
//! so a source contributes exactly one feed no matter how many snapshots list it.
//! Feeds that are already attached are never re-subscribed, which means a new snapshot
//! neither interrupts them nor replays their readings.
//!
//! The first [`WARM_UP_READINGS`] readings of every attached feed are discarded.
//!
//! The merged stream ends once the snapshot stream has ended and every attached feed
//! has ended.

use futures::stream::SelectAll;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use std::collections::HashSet;
use std::pin::Pin;
use std::task::{Context, Poll};
use tagflux_core::{SourceId, SourceReading};

use crate::{SkipItemsExt, Source, SourceSnapshot};

/// Number of readings dropped from the head of every newly attached feed.
pub const WARM_UP_READINGS: usize = 1;

type AttachedFeed = Pin<Box<dyn Stream<Item = SourceReading> + Send + 'static>>;

/// Stream returned by [`MergeSourcesExt::merge_sources`].
#[pin_project]
pub struct MergeSources<S> {
    #[pin]
    snapshots: S,
    snapshots_done: bool,
    feeds: SelectAll<AttachedFeed>,
    attached: HashSet<SourceId>,
}

impl<S> MergeSources<S> {
    fn new(snapshots: S) -> Self {
        Self {
            snapshots,
            snapshots_done: false,
            feeds: SelectAll::new(),
            attached: HashSet::new(),
        }
    }
}

fn attach(source: &Source) -> Option<AttachedFeed> {
    let readings = match source.feed.subscribe() {
        Ok(readings) => readings,
        Err(error) => {
            warn!("cannot attach source {}: {}", source.id, error);
            return None;
        }
    };
    let id = source.id.clone();
    debug!("attaching source {}", id);
    Some(Box::pin(
        readings
            .skip_items(WARM_UP_READINGS)
            .map(move |reading| SourceReading::new(id.clone(), reading)),
    ))
}

impl<S> Stream for MergeSources<S>
where
    S: Stream<Item = SourceSnapshot>,
{
    type Item = SourceReading;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        while !*this.snapshots_done {
            match this.snapshots.as_mut().poll_next(cx) {
                Poll::Ready(Some(snapshot)) => {
                    for source in snapshot.iter() {
                        if this.attached.contains(&source.id) {
                            continue;
                        }
                        this.attached.insert(source.id.clone());
                        if let Some(feed) = attach(source) {
                            this.feeds.push(feed);
                        }
                    }
                }
                Poll::Ready(None) => *this.snapshots_done = true,
                Poll::Pending => break,
            }
        }

        match this.feeds.poll_next_unpin(cx) {
            Poll::Ready(Some(reading)) => Poll::Ready(Some(reading)),
            // An empty set of feeds is not the end while more sources may arrive.
            Poll::Ready(None) if !*this.snapshots_done => Poll::Pending,
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Extension trait providing the `merge_sources` operator for snapshot streams.
pub trait MergeSourcesExt: Stream<Item = SourceSnapshot> + Sized {
    /// Merges the readings of every source listed by the snapshots.
    ///
    /// Sources are attached in snapshot order the first time they appear. Readings from
    /// different sources interleave in arrival order; readings of one source keep their
    /// relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use futures::{stream, StreamExt};
    /// use tagflux_core::{FoundSource, RawReading};
    /// use tagflux_stream::{MergeSourcesExt, SourceRegistry};
    ///
    /// # async fn example() {
    /// let readings = stream::iter(vec![RawReading::raw(), RawReading::raw().with_rssi(-70.0)]);
    /// let registry = SourceRegistry::spawn(stream::iter(vec![FoundSource::new("c4a1", readings)]));
    ///
    /// let mut merged = registry.subscribe().unwrap().merge_sources();
    /// let reading = merged.next().await.unwrap();
    /// assert_eq!(reading.reading.rssi, Some(-70.0));
    /// # }
    /// ```
    fn merge_sources(self) -> MergeSources<Self>;
}

impl<S> MergeSourcesExt for S
where
    S: Stream<Item = SourceSnapshot>,
{
    fn merge_sources(self) -> MergeSources<Self> {
        MergeSources::new(self)
    }
}
