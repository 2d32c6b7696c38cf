// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber broadcast.
//!
//! A [`TagSubject`] forwards each item to every subscriber that is currently attached.
//!
//! ## Characteristics
//!
//! - **Hot**: Late subscribers do not receive past items, only items sent after subscribing.
//! - **Unbounded**: Uses unbounded mpsc channels internally (no backpressure).
//! - **Thread-safe**: Cheap to clone; all clones share the same internal state.
//! - **Close**: Closing ends every subscriber stream and refuses new subscriptions.
//!
//! ## Example
//!
//! ```
//! use tagflux_core::TagSubject;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = TagSubject::<i32>::new();
//! let mut stream = subject.subscribe().unwrap();
//!
//! subject.send(1).unwrap();
//! subject.send(2).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(1));
//! assert_eq!(stream.next().await, Some(2));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use futures::channel::mpsc::{self, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use tagflux_error::{Result, TagfluxError};

/// Boxed stream handed out by [`TagSubject::subscribe`].
pub type SubjectBoxStream<T> = Pin<Box<dyn Stream<Item = T> + Send + 'static>>;

struct SubjectState<T> {
    closed: bool,
    senders: Vec<UnboundedSender<T>>,
}

/// A hot, unbounded subject that broadcasts items to all current subscribers.
pub struct TagSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> TagSubject<T> {
    /// Creates a new open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe to this subject. Late subscribers do not receive previously sent items.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::Closed` if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectBoxStream<T>> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(TagfluxError::closed("subject"));
        }

        let (tx, rx) = mpsc::unbounded();
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// Send an item to all active subscribers.
    ///
    /// Subscribers whose stream has been dropped are pruned here.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::Closed` if the subject has been closed.
    pub fn send(&self, item: T) -> Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(TagfluxError::closed("subject"));
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
        Ok(())
    }

    /// Closes the subject, completing all subscriber streams.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of attached subscribers.
    ///
    /// Updated lazily: dropped subscribers are removed on the next `send()`.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + 'static> Default for TagSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for TagSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
