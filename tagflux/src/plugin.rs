// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Host-facing lifecycle of the sensor tag plugin.

use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tagflux_core::{
    ConfigStore, Discovery, Result, SourceConfig, SourceConfigPatch, SourceId, TagfluxError,
};
use tagflux_exec::{DeltaSink, EmissionFilter};
use tokio::runtime::Handle;

use crate::discovery_state::DiscoveryState;
use crate::options::PluginOptions;
use crate::pipeline::Pipeline;
use crate::schema;

pub const PLUGIN_ID: &str = "ruuvitag";
pub const PLUGIN_NAME: &str = "RuuviTag Plugin";
pub const PLUGIN_DESCRIPTION: &str = "Provides environment data from nearby RuuviTag beacons.";

/// Discovers sensor tags, merges their readings and emits deltas for enabled tags.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use std::sync::Arc;
/// use tagflux::prelude::*;
/// use tagflux_test_utils::{fixtures, MockDiscovery, RecordingSink};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), TagfluxError> {
/// let (discovery, handle) = MockDiscovery::new();
/// let sink = RecordingSink::new();
/// let plugin = TagPlugin::new(
///     Arc::new(discovery),
///     Arc::new(sink.callback()),
///     PluginOptions::default(),
/// );
///
/// plugin.start(&json!({ "c4a1d2e3f4a5": { "name": "galley", "location": "", "enabled": true } }))?;
/// let tag = handle.found(fixtures::galley_id());
/// tag.send(fixtures::warm_up_reading()).unwrap();
/// tag.send(fixtures::outdoor_reading()).unwrap();
///
/// assert!(sink.wait_for(1, 1_000).await);
/// assert_eq!(sink.deltas()[0].value_at("environment.outside.temperature"), Some(288.15));
/// plugin.stop();
/// # Ok(())
/// # }
/// ```
pub struct TagPlugin {
    discovery: DiscoveryState,
    sink: Arc<dyn DeltaSink>,
    options: PluginOptions,
    store: ConfigStore,
    pipeline: Mutex<Option<Pipeline>>,
}

impl TagPlugin {
    pub fn new(
        discovery: Arc<dyn Discovery>,
        sink: Arc<dyn DeltaSink>,
        options: PluginOptions,
    ) -> Self {
        Self {
            discovery: DiscoveryState::new(discovery),
            sink,
            store: ConfigStore::new(options.location_policy),
            options,
            pipeline: Mutex::new(None),
        }
    }

    pub const fn id(&self) -> &'static str {
        PLUGIN_ID
    }

    pub const fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub const fn description(&self) -> &'static str {
        PLUGIN_DESCRIPTION
    }

    #[must_use]
    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Starts emitting with `initial_config` as the per-source settings.
    ///
    /// A running pipeline is stopped first. A config that is not a JSON object (or
    /// `null`) is logged and replaced by an empty mapping; malformed per-source fields
    /// fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::RuntimeUnavailable` when called outside a Tokio runtime.
    pub fn start(&self, initial_config: &Value) -> Result<()> {
        Handle::try_current().map_err(|_| TagfluxError::runtime_unavailable("start"))?;

        let previous = self.pipeline.lock().take();
        if let Some(running) = previous {
            running.stop();
            info!("restarting {}", PLUGIN_ID);
        }

        if let Err(err) = self.store.replace(initial_config) {
            warn!("ignoring malformed configuration: {}", err);
            self.store.replace(&Value::Null)?;
        }

        let registry = self.discovery.acquire();
        let filter = EmissionFilter::new(
            PLUGIN_ID,
            self.options.source_prefix.clone(),
            self.options.rounding,
            Arc::clone(&self.sink),
        );
        let running = Pipeline::spawn(
            &registry,
            self.store.clone(),
            self.options.normalize_options(),
            filter,
        )?;

        // A concurrent start may have installed its own pipeline meanwhile.
        let replaced = self.pipeline.lock().replace(running);
        if let Some(stale) = replaced {
            stale.stop();
        }

        info!("{} started with {} configured sources", PLUGIN_ID, self.store.len());
        Ok(())
    }

    /// Stops emitting. Safe to call repeatedly and without a prior `start`.
    ///
    /// Discovered sources stay registered for the next `start`. May be called from inside
    /// [`DeltaSink::handle_message`]; the delta being delivered is the last one.
    pub fn stop(&self) {
        let running = self.pipeline.lock().take();
        if let Some(running) = running {
            running.stop();
            info!("{} stopped", PLUGIN_ID);
        }
    }

    /// Stops emitting and releases the discovery transport.
    pub fn shutdown(&self) {
        self.stop();
        self.discovery.teardown();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pipeline.lock().is_some()
    }

    /// The live per-source settings, including seeded defaults, for the host to persist.
    #[must_use]
    pub fn config(&self) -> Value {
        self.store.to_json()
    }

    /// Settings currently applied to `id` (defaults if it has none).
    #[must_use]
    pub fn source_config(&self, id: &SourceId) -> SourceConfig {
        self.store.get(id)
    }

    /// Applies a user edit; takes effect from the next reading.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::InvalidConfig` if a field fails validation; nothing is
    /// applied in that case.
    pub fn set_source_config(
        &self,
        id: &SourceId,
        patch: SourceConfigPatch,
    ) -> Result<SourceConfig> {
        self.store.set(id, patch)
    }

    /// JSON schema describing the settings of every known source.
    #[must_use]
    pub fn schema(&self) -> Value {
        schema::schema(&self.store)
    }
}

impl Drop for TagPlugin {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for TagPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagPlugin")
            .field("options", &self.options)
            .field("discovery", &self.discovery)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
