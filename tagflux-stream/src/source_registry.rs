// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Accumulating registry of discovered sources.
//!
//! [`SourceRegistry::spawn`] folds a stream of [`FoundSource`] notifications into an
//! ordered, duplicate-free list of [`Source`]s. Every time a new source is folded in,
//! the full list is published as a fresh [`SourceSnapshot`].
//!
//! ## Characteristics
//!
//! - **Append-only**: Sources are never removed; each snapshot is a superset of the
//!   previous one, in discovery order.
//! - **Replaying**: A new subscriber first receives the current snapshot (possibly
//!   empty), then every later one.
//! - **Idle-capable**: [`SourceRegistry::idle`] builds a registry that never discovers
//!   anything, used when the transport is unavailable.

use futures::channel::mpsc::{self, UnboundedSender};
use futures::{future, Stream, StreamExt};
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use tagflux_core::{FoundSource, Result, SourceId, TagfluxError};
use tokio_util::sync::CancellationToken;

use crate::ReadingFeed;

/// A discovered source and its shared reading feed.
#[derive(Clone, Debug)]
pub struct Source {
    pub id: SourceId,
    pub feed: ReadingFeed,
}

/// Every source discovered so far, in discovery order.
pub type SourceSnapshot = Arc<[Source]>;

/// Stream of snapshots handed out by [`SourceRegistry::subscribe`].
pub type SnapshotStream = Pin<Box<dyn Stream<Item = SourceSnapshot> + Send + 'static>>;

struct RegistryState {
    snapshot: SourceSnapshot,
    senders: Vec<UnboundedSender<SourceSnapshot>>,
    closed: bool,
}

struct RegistryInner {
    state: Mutex<RegistryState>,
    cancel: CancellationToken,
}

impl RegistryInner {
    fn publish(&self, snapshot: SourceSnapshot) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.snapshot = snapshot.clone();
        state
            .senders
            .retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }
}

/// Cheaply cloneable handle to a shared source registry.
#[derive(Clone)]
pub struct SourceRegistry {
    inner: Arc<RegistryInner>,
}

impl SourceRegistry {
    /// A registry with no sources that never discovers any.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                state: Mutex::new(RegistryState {
                    snapshot: Arc::from(Vec::new()),
                    senders: Vec::new(),
                    closed: false,
                }),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Starts folding `found` into the registry on the current Tokio runtime.
    ///
    /// A notification for an id that is already registered is ignored. When `found`
    /// ends, the registry keeps its last snapshot and subscribers stay open.
    pub fn spawn<S>(found: S) -> Self
    where
        S: Stream<Item = FoundSource> + Send + 'static,
    {
        let registry = Self::idle();
        let inner = Arc::clone(&registry.inner);
        let cancel = registry.inner.cancel.clone();

        let snapshots = found
            .scan(Vec::<Source>::new(), |known, found| {
                if known.iter().any(|source| source.id == found.id) {
                    warn!("ignoring repeated discovery of source {}", found.id);
                    return future::ready(Some(None));
                }
                debug!("discovered source {}", found.id);
                let feed = ReadingFeed::new(found.id.clone(), found.readings);
                known.push(Source { id: found.id, feed });
                future::ready(Some(Some(SourceSnapshot::from(known.as_slice()))))
            })
            .filter_map(future::ready);

        tokio::spawn(async move {
            let mut snapshots = std::pin::pin!(snapshots);
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    next = snapshots.next() => match next {
                        Some(snapshot) => inner.publish(snapshot),
                        None => {
                            debug!("source discovery feed ended");
                            break;
                        }
                    },
                }
            }
        });

        registry
    }

    /// Subscribes to snapshots, starting with the current one.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::Closed` if the registry has been closed.
    pub fn subscribe(&self) -> Result<SnapshotStream> {
        let mut state = self.inner.state.lock();
        if state.closed {
            return Err(TagfluxError::closed("source registry"));
        }

        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(state.snapshot.clone())
            .map_err(|_| TagfluxError::ChannelSendError)?;
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SourceSnapshot {
        self.inner.state.lock().snapshot.clone()
    }

    /// Number of sources discovered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().snapshot.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// Stops discovery, ends every snapshot subscription and closes every feed.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        self.inner.cancel.cancel();
        let snapshot = {
            let mut state = self.inner.state.lock();
            state.closed = true;
            state.senders.clear();
            state.snapshot.clone()
        };
        for source in snapshot.iter() {
            source.feed.close();
        }
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("SourceRegistry")
            .field("sources", &state.snapshot.len())
            .field("subscribers", &state.senders.len())
            .field("closed", &state.closed)
            .finish()
    }
}
