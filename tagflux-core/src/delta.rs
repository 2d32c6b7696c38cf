// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delta records handed to the host sink.
//!
//! Wire shape:
//!
//! ```json
//! { "updates": [ { "source": "ruuvitag.galley",
//!                  "timestamp": "2025-06-01T12:00:00Z",
//!                  "values": [ { "path": "environment.inside.galley.temperature",
//!                                "value": 293.15 } ] } ] }
//! ```

use crate::MeasurementRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timestamped batch of path/value pairs describing a source's current state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaEvent {
    pub updates: Vec<Update>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// `<prefix>.<displayName>`
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub values: Vec<PathValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathValue {
    pub path: String,
    pub value: f64,
}

/// Decimal places kept per field when a record is turned into a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rounding {
    pub humidity: u32,
    pub temperature: u32,
    pub pressure: u32,
    pub rssi: u32,
    pub battery: u32,
    pub acceleration: u32,
}

impl Default for Rounding {
    fn default() -> Self {
        Self {
            humidity: 2,
            temperature: 2,
            pressure: 0,
            rssi: 0,
            battery: 3,
            acceleration: 3,
        }
    }
}

impl Rounding {
    /// Rounds half away from zero to `decimals` places.
    pub fn round(value: f64, decimals: u32) -> f64 {
        let scale = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
        if !scale.is_finite() {
            return value;
        }
        (value * scale).round() / scale
    }
}

impl DeltaEvent {
    /// Builds the delta for one record, with one value per quantity the record carries.
    pub fn from_record(
        record: &MeasurementRecord,
        prefix: &str,
        rounding: &Rounding,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let environment = |field: &str| format!("environment.{}.{field}", record.location);
        let mut values = Vec::with_capacity(8);
        let mut push = |path: String, value: Option<f64>, decimals: u32| {
            if let Some(value) = value {
                values.push(PathValue {
                    path,
                    value: Rounding::round(value, decimals),
                });
            }
        };

        push(
            environment(record.humidity_key.as_str()),
            record.humidity,
            rounding.humidity,
        );
        push(
            environment("temperature"),
            record.temperature,
            rounding.temperature,
        );
        push(environment("pressure"), record.pressure, rounding.pressure);
        push(environment("rssi"), record.rssi, rounding.rssi);
        push(
            environment("accelerationX"),
            record.acceleration_x,
            rounding.acceleration,
        );
        push(
            environment("accelerationY"),
            record.acceleration_y,
            rounding.acceleration,
        );
        push(
            environment("accelerationZ"),
            record.acceleration_z,
            rounding.acceleration,
        );
        push(
            format!("electrical.batteries.{}.voltage", record.name),
            record.battery,
            rounding.battery,
        );

        Self {
            updates: vec![Update {
                source: format!("{prefix}.{}", record.name),
                timestamp,
                values,
            }],
        }
    }

    /// Iterates over every path/value pair of every update.
    pub fn values(&self) -> impl Iterator<Item = &PathValue> {
        self.updates.iter().flat_map(|update| update.values.iter())
    }

    /// Looks up the value published under `path`, if any.
    pub fn value_at(&self, path: &str) -> Option<f64> {
        self.values().find(|pv| pv.path == path).map(|pv| pv.value)
    }

    /// Source label of the first update.
    pub fn source(&self) -> Option<&str> {
        self.updates.first().map(|update| update.source.as_str())
    }
}
