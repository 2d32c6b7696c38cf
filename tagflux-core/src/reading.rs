// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Raw payloads as reported by the discovery transport.

use crate::SourceId;
use serde::{Deserialize, Serialize};

/// How a reading reached us, which decides the unit of its pressure field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadingKind {
    /// Sampled off the device's native protocol; pressure is in hPa.
    #[default]
    Raw,
    /// Received through an advertised beacon format; pressure is already in Pa.
    Derived,
}

/// One instantaneous sample from a source, in device units.
///
/// Every physical field is optional: beacon formats omit some quantities, and a
/// missing field simply produces no output value downstream.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReading {
    /// Relative humidity in percent (0–100).
    pub humidity: Option<f64>,
    /// Pressure in hPa for [`ReadingKind::Raw`], Pa for [`ReadingKind::Derived`].
    pub pressure: Option<f64>,
    /// Temperature in °C.
    pub temperature: Option<f64>,
    /// Acceleration in raw device units (mg).
    pub acceleration_x: Option<f64>,
    pub acceleration_y: Option<f64>,
    pub acceleration_z: Option<f64>,
    /// Received signal strength in dBm.
    pub rssi: Option<f64>,
    /// Battery voltage in mV.
    pub battery: Option<f64>,
    pub kind: ReadingKind,
}

impl RawReading {
    /// An empty reading received over the device's native protocol.
    #[must_use]
    pub fn raw() -> Self {
        Self::default()
    }

    /// An empty reading received through a beacon advertisement.
    #[must_use]
    pub fn derived() -> Self {
        Self {
            kind: ReadingKind::Derived,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_humidity(mut self, percent: f64) -> Self {
        self.humidity = Some(percent);
        self
    }

    #[must_use]
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature = Some(celsius);
        self
    }

    #[must_use]
    pub fn with_acceleration(mut self, x: f64, y: f64, z: f64) -> Self {
        self.acceleration_x = Some(x);
        self.acceleration_y = Some(y);
        self.acceleration_z = Some(z);
        self
    }

    #[must_use]
    pub fn with_rssi(mut self, dbm: f64) -> Self {
        self.rssi = Some(dbm);
        self
    }

    #[must_use]
    pub fn with_battery(mut self, millivolts: f64) -> Self {
        self.battery = Some(millivolts);
        self
    }

    pub const fn is_raw(&self) -> bool {
        matches!(self.kind, ReadingKind::Raw)
    }
}

/// A reading tagged with the source that produced it, as emitted by the fan-in merge.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReading {
    pub id: SourceId,
    pub reading: RawReading,
}

impl SourceReading {
    pub fn new(id: SourceId, reading: RawReading) -> Self {
        Self { id, reading }
    }
}
