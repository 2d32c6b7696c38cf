// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pure reading → measurement transformation.
//!
//! [`normalize`] converts device units to SI units and resolves the output path of a
//! reading from its source's settings. It is deterministic and side-effect free, so it
//! can be re-run on the same inputs at will.
//!
//! | Quantity | Input | Output | Conversion |
//! |----------|-------|--------|------------|
//! | humidity | % | fraction | ÷ 100 |
//! | temperature | °C | K | + 273.15 |
//! | battery | mV | V | ÷ 1000 |
//! | acceleration | mg | g | ÷ 1000, when enabled |
//! | pressure | hPa (raw) / Pa (derived) | Pa | × 100 for raw readings only |
//!
//! Values are kept at full precision here; rounding is an output concern handled by
//! [`Rounding`](crate::Rounding) when the delta is built.

use crate::{HumidityKey, LocationPolicy, RawReading, SourceConfig, SourceId};
use serde::{Deserialize, Serialize};

const PERCENT_PER_FRACTION: f64 = 100.0;
const KELVIN_OFFSET: f64 = 273.15;
const MILLI_PER_UNIT: f64 = 1000.0;
const PASCAL_PER_HECTOPASCAL: f64 = 100.0;

/// Knobs of the normalization stage that vary between configuration versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NormalizeOptions {
    pub location_policy: LocationPolicy,
    /// Convert acceleration from mg to g. When off, axes pass through in device units.
    pub normalize_acceleration: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            location_policy: LocationPolicy::ShortLocation,
            normalize_acceleration: true,
        }
    }
}

/// A reading in canonical units, addressed by its source's resolved location.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub id: SourceId,
    pub name: String,
    pub enabled: bool,
    /// Path below `environment.`, e.g. `inside.mainCabin`
    pub location: String,
    pub humidity_key: HumidityKey,
    /// Relative humidity as a fraction (0–1)
    pub humidity: Option<f64>,
    /// Kelvin
    pub temperature: Option<f64>,
    /// Pascal
    pub pressure: Option<f64>,
    pub acceleration_x: Option<f64>,
    pub acceleration_y: Option<f64>,
    pub acceleration_z: Option<f64>,
    /// dBm
    pub rssi: Option<f64>,
    /// Volts
    pub battery: Option<f64>,
}

/// Converts one raw reading using a snapshot of its source's settings.
pub fn normalize(
    config: &SourceConfig,
    reading: &RawReading,
    options: &NormalizeOptions,
) -> MeasurementRecord {
    let resolved = options.location_policy.resolve(&config.location);

    let acceleration = |axis: Option<f64>| {
        if options.normalize_acceleration {
            axis.map(|mg| mg / MILLI_PER_UNIT)
        } else {
            axis
        }
    };

    let pressure = if reading.is_raw() {
        reading.pressure.map(|hpa| hpa * PASCAL_PER_HECTOPASCAL)
    } else {
        reading.pressure
    };

    MeasurementRecord {
        id: config.id.clone(),
        name: config.name.clone(),
        enabled: config.enabled,
        location: resolved.path,
        humidity_key: resolved.humidity_key,
        humidity: reading.humidity.map(|percent| percent / PERCENT_PER_FRACTION),
        temperature: reading.temperature.map(|celsius| celsius + KELVIN_OFFSET),
        pressure,
        acceleration_x: acceleration(reading.acceleration_x),
        acceleration_y: acceleration(reading.acceleration_y),
        acceleration_z: acceleration(reading.acceleration_z),
        rssi: reading.rssi,
        battery: reading.battery.map(|mv| mv / MILLI_PER_UNIT),
    }
}
