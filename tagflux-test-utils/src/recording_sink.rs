// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delta sink that remembers everything it receives.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tagflux_core::DeltaEvent;
use tokio::sync::Notify;
use tokio::time::timeout;

/// Records `(plugin_id, delta)` pairs handed to its [`callback`](Self::callback).
///
/// The callback is a plain `Fn(&str, DeltaEvent)` closure, so it plugs into any API
/// that accepts closure sinks.
#[derive(Clone, Default)]
pub struct RecordingSink {
    received: Arc<Mutex<Vec<(String, DeltaEvent)>>>,
    notify: Arc<Notify>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> impl Fn(&str, DeltaEvent) + Send + Sync + 'static {
        let received = Arc::clone(&self.received);
        let notify = Arc::clone(&self.notify);
        move |plugin_id: &str, delta: DeltaEvent| {
            received.lock().push((plugin_id.to_string(), delta));
            notify.notify_one();
        }
    }

    pub fn deltas(&self) -> Vec<DeltaEvent> {
        self.received
            .lock()
            .iter()
            .map(|(_, delta)| delta.clone())
            .collect()
    }

    pub fn plugin_ids(&self) -> Vec<String> {
        self.received
            .lock()
            .iter()
            .map(|(plugin_id, _)| plugin_id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.received.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Waits until at least `count` deltas arrived; false on timeout.
    pub async fn wait_for(&self, count: usize, timeout_ms: u64) -> bool {
        let wait = async {
            while self.len() < count {
                self.notify.notified().await;
            }
        };
        timeout(Duration::from_millis(timeout_ms), wait).await.is_ok()
    }
}
