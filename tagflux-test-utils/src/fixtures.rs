// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Ready-made source ids and readings.

use tagflux_core::{RawReading, SourceId};

pub fn galley_id() -> SourceId {
    SourceId::new("c4a1d2e3f4a5")
}

pub fn cockpit_id() -> SourceId {
    SourceId::new("d5b2e3f4a5b6")
}

pub fn mast_id() -> SourceId {
    SourceId::new("e6c3f4a5b6c7")
}

/// The reading a tag reports right after it is discovered.
pub fn warm_up_reading() -> RawReading {
    RawReading::raw()
        .with_humidity(99.0)
        .with_pressure(900.0)
        .with_temperature(-40.0)
        .with_rssi(-99.0)
        .with_battery(2000.0)
}

/// Mild outdoor conditions: 40 %, 1000 hPa, 15 °C.
pub fn outdoor_reading() -> RawReading {
    RawReading::raw()
        .with_humidity(40.0)
        .with_pressure(1000.0)
        .with_temperature(15.0)
        .with_rssi(-80.0)
        .with_battery(3100.0)
}

pub fn cabin_reading() -> RawReading {
    RawReading::raw()
        .with_humidity(55.0)
        .with_pressure(1012.0)
        .with_temperature(21.5)
        .with_rssi(-64.0)
        .with_battery(2950.0)
}

/// A tag that reports acceleration in milli-g.
pub fn moving_reading() -> RawReading {
    cabin_reading().with_acceleration(-12.0, 4.0, 1016.0)
}
