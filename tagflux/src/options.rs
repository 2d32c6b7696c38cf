// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tagflux_core::{LocationPolicy, NormalizeOptions, Result, Rounding, TagfluxError};

/// Prefix of the `source` label on every emitted update.
pub const DEFAULT_SOURCE_PREFIX: &str = "ruuvitag";

/// Deployment-wide settings, fixed for the lifetime of a [`TagPlugin`](crate::TagPlugin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    pub location_policy: LocationPolicy,
    /// Convert acceleration from milli-g to g.
    pub normalize_acceleration: bool,
    pub source_prefix: String,
    pub rounding: Rounding,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            location_policy: LocationPolicy::default(),
            normalize_acceleration: true,
            source_prefix: DEFAULT_SOURCE_PREFIX.to_string(),
            rounding: Rounding::default(),
        }
    }
}

impl PluginOptions {
    /// Parses options from JSON; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `TagfluxError::InvalidConfig` if a present field has the wrong shape.
    pub fn from_json(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|error| TagfluxError::invalid_config("*", "options", error.to_string()))
    }

    #[must_use]
    pub fn with_location_policy(mut self, policy: LocationPolicy) -> Self {
        self.location_policy = policy;
        self
    }

    #[must_use]
    pub fn with_source_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.source_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            location_policy: self.location_policy,
            normalize_acceleration: self.normalize_acceleration,
        }
    }
}
