// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lazily connected, multi-subscriber reading feed for one source.
//!
//! A [`ReadingFeed`] owns the private reading stream handed over by discovery. Nothing
//! is consumed until the first call to [`ReadingFeed::subscribe`]; at that point a
//! forwarding task is spawned that pushes every reading into an internal
//! [`TagSubject`].
//!
//! ## Characteristics
//!
//! - **Lazy**: The source stream is left untouched until somebody subscribes.
//! - **Hot**: Later subscribers only see readings forwarded after they subscribed.
//! - **Owned lifecycle**: The forwarding task is cancelled by [`ReadingFeed::close`] or
//!   once every clone of the feed and every [`FeedSubscription`] are dropped.
//!
//! `subscribe` spawns on the current Tokio runtime and must be called from within one.

use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tagflux_core::subject::SubjectBoxStream;
use tagflux_core::{RawReading, ReadingStream, Result, SourceId, TagSubject};
use tokio_util::sync::CancellationToken;

struct FeedInner {
    id: SourceId,
    subject: TagSubject<RawReading>,
    pending: Mutex<Option<ReadingStream>>,
    cancel: CancellationToken,
}

impl Drop for FeedInner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Shared handle to one source's readings. Clones refer to the same feed.
#[derive(Clone)]
pub struct ReadingFeed {
    inner: Arc<FeedInner>,
}

impl ReadingFeed {
    /// Wraps a source's reading stream without consuming it.
    pub fn new(id: SourceId, readings: ReadingStream) -> Self {
        Self {
            inner: Arc::new(FeedInner {
                id,
                subject: TagSubject::new(),
                pending: Mutex::new(Some(readings)),
                cancel: CancellationToken::new(),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &SourceId {
        &self.inner.id
    }

    /// Subscribes to the feed, connecting it to the source on first use.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::Closed` once the source stream has ended or the feed was
    /// closed.
    pub fn subscribe(&self) -> Result<FeedSubscription> {
        let readings = self.inner.subject.subscribe()?;
        let pending = self.inner.pending.lock().take();
        if let Some(source) = pending {
            self.connect(source);
        }
        Ok(FeedSubscription {
            readings,
            feed: Arc::clone(&self.inner),
        })
    }

    fn connect(&self, mut readings: ReadingStream) {
        let subject = self.inner.subject.clone();
        let cancel = self.inner.cancel.clone();
        let id = self.inner.id.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    next = readings.next() => match next {
                        Some(reading) => {
                            if subject.send(reading).is_err() {
                                break;
                            }
                        }
                        None => {
                            debug!("reading feed for {} ended", id);
                            break;
                        }
                    },
                }
            }
            subject.close();
        });
    }

    /// True once the source stream has been handed to the forwarding task or dropped
    /// by [`close`](Self::close).
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.pending.lock().is_none()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.subject.is_closed()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subject.subscriber_count()
    }

    /// Stops forwarding and ends every subscriber stream. Idempotent.
    pub fn close(&self) {
        self.inner.cancel.cancel();
        self.inner.pending.lock().take();
        self.inner.subject.close();
    }
}

impl fmt::Debug for ReadingFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadingFeed")
            .field("id", &self.inner.id)
            .field("connected", &self.is_connected())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Subscriber stream returned by [`ReadingFeed::subscribe`].
///
/// Keeps its feed connected while alive, even after every [`ReadingFeed`] handle is gone.
pub struct FeedSubscription {
    readings: SubjectBoxStream<RawReading>,
    feed: Arc<FeedInner>,
}

impl Stream for FeedSubscription {
    type Item = RawReading;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().readings.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.readings.size_hint()
    }
}

impl fmt::Debug for FeedSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedSubscription")
            .field("id", &self.feed.id)
            .finish_non_exhaustive()
    }
}
