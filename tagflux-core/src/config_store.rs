// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Live id → settings mapping shared between the pipeline and configuration edits.
//!
//! The store is cheap to clone; all clones share one mapping behind a single mutex.
//! Every read copies the entry out, so the guard is never held while a reading is
//! normalized.
//!
//! ## Example
//!
//! ```
//! use tagflux_core::{ConfigStore, LocationPolicy, SourceConfigPatch, SourceId};
//!
//! let store = ConfigStore::new(LocationPolicy::ShortLocation);
//! let id = SourceId::new("c4a1d2e3f4a5");
//!
//! assert!(store.ensure_default(&id));
//! assert!(!store.ensure_default(&id)); // idempotent
//!
//! store.set(&id, SourceConfigPatch::enable().with_name("galley")).unwrap();
//! assert_eq!(store.get(&id).name, "galley");
//! ```

use crate::{LocationPolicy, SourceConfig, SourceConfigPatch, SourceId};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tagflux_error::{Result, TagfluxError};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    policy: LocationPolicy,
    entries: Arc<Mutex<BTreeMap<SourceId, SourceConfig>>>,
}

impl ConfigStore {
    /// Creates an empty store whose defaults follow `policy`.
    #[must_use]
    pub fn new(policy: LocationPolicy) -> Self {
        Self {
            policy,
            entries: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Creates a store from a persisted JSON object keyed by source id.
    pub fn from_json(value: &Value, policy: LocationPolicy) -> Result<Self> {
        let store = Self::new(policy);
        store.replace(value)?;
        Ok(store)
    }

    pub const fn policy(&self) -> LocationPolicy {
        self.policy
    }

    /// Returns a copy of the settings for `id`, or its defaults if none exist yet.
    pub fn get(&self, id: &SourceId) -> SourceConfig {
        self.entries
            .lock()
            .get(id)
            .cloned()
            .unwrap_or_else(|| SourceConfig::default_for(id, self.policy))
    }

    /// Inserts default settings for `id` unless an entry already exists.
    ///
    /// Returns `true` when an entry was inserted. Existing entries, including user
    /// edits, are never overwritten.
    pub fn ensure_default(&self, id: &SourceId) -> bool {
        let mut entries = self.entries.lock();
        if entries.contains_key(id) {
            return false;
        }
        entries.insert(id.clone(), SourceConfig::default_for(id, self.policy));
        true
    }

    /// Applies a configuration edit to `id`, creating its entry from defaults if needed.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::InvalidConfig` if a field of the edit fails validation; the
    /// stored settings are left unchanged in that case.
    pub fn set(&self, id: &SourceId, patch: SourceConfigPatch) -> Result<SourceConfig> {
        let mut entries = self.entries.lock();
        let mut updated = entries
            .get(id)
            .cloned()
            .unwrap_or_else(|| SourceConfig::default_for(id, self.policy));
        updated.apply(patch, self.policy)?;
        entries.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    /// Replaces the whole mapping with the entries of a persisted JSON object.
    ///
    /// Malformed fields of individual entries fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::InvalidConfig` if `value` is not a JSON object; the current
    /// mapping is kept in that case.
    pub fn replace(&self, value: &Value) -> Result<()> {
        let empty = Map::new();
        let object = match value {
            Value::Object(object) => object,
            Value::Null => &empty,
            other => {
                return Err(TagfluxError::invalid_config(
                    "*",
                    "config",
                    format!("expected an object keyed by source id, got {other}"),
                ))
            }
        };

        let loaded: BTreeMap<SourceId, SourceConfig> = object
            .iter()
            .map(|(key, entry)| {
                let id = SourceId::new(key.as_str());
                let config = SourceConfig::from_json(&id, entry, self.policy);
                (id, config)
            })
            .collect();

        *self.entries.lock() = loaded;
        Ok(())
    }

    /// Exports the mapping as a JSON object keyed by source id.
    pub fn to_json(&self) -> Value {
        let entries = self.snapshot();
        let object: Map<String, Value> = entries
            .into_iter()
            .map(|(id, config)| {
                let value = serde_json::to_value(&config).unwrap_or(Value::Null);
                (id.as_str().to_string(), value)
            })
            .collect();
        Value::Object(object)
    }

    /// Copies the whole mapping out of the store.
    pub fn snapshot(&self) -> BTreeMap<SourceId, SourceConfig> {
        self.entries.lock().clone()
    }

    pub fn ids(&self) -> Vec<SourceId> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn contains(&self, id: &SourceId) -> bool {
        self.entries.lock().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(LocationPolicy::default())
    }
}
