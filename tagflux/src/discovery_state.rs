// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Once-per-plugin ownership of the discovery transport.
//!
//! The transport is initialized on the first [`DiscoveryState::acquire`] and the
//! resulting [`SourceRegistry`] is handed out to every later caller, so restarting the
//! pipeline keeps every source discovered so far. An initialization failure is logged
//! here, once, and replaced by an idle registry.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tagflux_core::Discovery;
use tagflux_stream::SourceRegistry;

pub struct DiscoveryState {
    discovery: Arc<dyn Discovery>,
    registry: Mutex<Option<SourceRegistry>>,
}

impl DiscoveryState {
    pub fn new(discovery: Arc<dyn Discovery>) -> Self {
        Self {
            discovery,
            registry: Mutex::new(None),
        }
    }

    /// Returns the shared registry, starting discovery on first use.
    ///
    /// Must be called from within a Tokio runtime the first time.
    pub fn acquire(&self) -> SourceRegistry {
        let mut registry = self.registry.lock();
        if let Some(registry) = registry.as_ref() {
            return registry.clone();
        }

        let acquired = match self.discovery.listen() {
            Ok(found) => {
                info!("source discovery started");
                SourceRegistry::spawn(found)
            }
            Err(err) => {
                error!("source discovery unavailable, continuing without sources: {}", err);
                SourceRegistry::idle()
            }
        };
        *registry = Some(acquired.clone());
        acquired
    }

    #[must_use]
    pub fn is_acquired(&self) -> bool {
        self.registry.lock().is_some()
    }

    /// Closes the registry; the next `acquire` starts discovery again.
    pub fn teardown(&self) {
        if let Some(registry) = self.registry.lock().take() {
            registry.close();
            info!("source discovery stopped");
        }
    }
}

impl fmt::Debug for DiscoveryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryState")
            .field("registry", &*self.registry.lock())
            .finish_non_exhaustive()
    }
}
