// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-source user settings.

use crate::{LocationPolicy, SourceId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tagflux_error::{Result, TagfluxError};

/// Longest accepted display name.
pub const MAX_NAME_LEN: usize = 12;

/// User-editable settings of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: SourceId,
    /// Display name, 1–12 ASCII alphanumeric characters.
    pub name: String,
    /// Addressing hint, interpreted by the active [`LocationPolicy`].
    pub location: String,
    pub enabled: bool,
}

/// A partial edit coming from the configuration interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfigPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub enabled: Option<bool>,
}

impl SourceConfig {
    /// Settings given to a source seen for the first time: disabled, named after its id.
    pub fn default_for(id: &SourceId, policy: LocationPolicy) -> Self {
        Self {
            id: id.clone(),
            name: id.short_name(),
            location: policy.default_location().to_string(),
            enabled: false,
        }
    }

    /// Reads settings from a persisted JSON entry.
    ///
    /// Each field is taken independently: a missing or malformed field falls back to its
    /// default without discarding the valid ones.
    pub fn from_json(id: &SourceId, value: &Value, policy: LocationPolicy) -> Self {
        let mut config = Self::default_for(id, policy);

        let Some(entry) = value.as_object() else {
            crate::warn!("config for {id} is not an object, using defaults");
            return config;
        };

        match entry.get("name") {
            None => {}
            Some(Value::String(name)) if *name == config.name || validate_name(name).is_ok() => {
                config.name = name.clone();
            }
            Some(other) => {
                crate::warn!("config for {id}: invalid name {other}, using '{}'", config.name)
            }
        }

        match entry.get("location") {
            None => {}
            Some(Value::String(location)) if policy.validate_location(location).is_ok() => {
                config.location = location.clone();
            }
            Some(other) => crate::warn!(
                "config for {id}: invalid location {other}, using '{}'",
                config.location
            ),
        }

        match entry.get("enabled") {
            None => {}
            Some(Value::Bool(enabled)) => config.enabled = *enabled,
            Some(other) => crate::warn!("config for {id}: invalid enabled flag {other}, disabling"),
        }

        config
    }

    /// Applies an edit after validating every present field.
    ///
    /// The edit is all-or-nothing: on error the settings are left untouched.
    pub fn apply(&mut self, patch: SourceConfigPatch, policy: LocationPolicy) -> Result<()> {
        if let Some(name) = &patch.name {
            validate_name(name)
                .map_err(|reason| TagfluxError::invalid_config(self.id.as_str(), "name", reason))?;
        }
        if let Some(location) = &patch.location {
            policy.validate_location(location).map_err(|reason| {
                TagfluxError::invalid_config(self.id.as_str(), "location", reason)
            })?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        Ok(())
    }
}

impl SourceConfigPatch {
    pub fn enable() -> Self {
        Self {
            enabled: Some(true),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }
}

fn validate_name(name: &str) -> std::result::Result<(), String> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(format!("must be 1-{MAX_NAME_LEN} characters, got {len}"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("must be alphanumeric".to_string());
    }
    Ok(())
}
