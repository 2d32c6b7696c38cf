// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};
use tagflux_core::{
    normalize, DeltaEvent, NormalizeOptions, RawReading, Rounding, SourceConfig, TagfluxError,
};
use tagflux_exec::{DeltaSink, EmissionFilter};
use tagflux_test_utils::fixtures;
use tokio::sync::mpsc;

fn record(enabled: bool, reading: RawReading) -> tagflux_core::MeasurementRecord {
    let config = SourceConfig {
        id: fixtures::galley_id(),
        name: "galley".to_string(),
        location: String::new(),
        enabled,
    };
    normalize(&config, &reading, &NormalizeOptions::default())
}

#[test]
fn test_enabled_record_is_forwarded_with_plugin_id() -> anyhow::Result<()> {
    // Arrange
    let received = Arc::new(Mutex::new(Vec::<(String, DeltaEvent)>::new()));
    let sink = {
        let received = received.clone();
        move |plugin_id: &str, delta: DeltaEvent| {
            received.lock().unwrap().push((plugin_id.to_string(), delta));
        }
    };
    let filter = EmissionFilter::new("ruuvitag", "ruuvitag", Rounding::default(), Arc::new(sink));

    // Act
    let emitted = filter.emit(&record(true, fixtures::outdoor_reading()))?;

    // Assert
    assert!(emitted);
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "ruuvitag");
    assert_eq!(received[0].1.source(), Some("ruuvitag.galley"));
    assert_eq!(
        received[0].1.value_at("environment.outside.temperature"),
        Some(288.15)
    );

    Ok(())
}

#[test]
fn test_disabled_record_is_dropped() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut rx) = mpsc::unbounded_channel::<DeltaEvent>();
    let filter = EmissionFilter::new("ruuvitag", "ruuvitag", Rounding::default(), Arc::new(tx));

    // Act
    let emitted = filter.emit(&record(false, fixtures::outdoor_reading()))?;

    // Assert
    assert!(!emitted);
    assert!(rx.try_recv().is_err());

    Ok(())
}

#[test]
fn test_emit_at_stamps_given_time_and_prefix() -> anyhow::Result<()> {
    // Arrange
    let (tx, mut rx) = mpsc::unbounded_channel::<DeltaEvent>();
    let filter = EmissionFilter::new("ruuvitag", "tags", Rounding::default(), Arc::new(tx));
    let timestamp = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    // Act
    filter.emit_at(&record(true, fixtures::cabin_reading()), timestamp)?;

    // Assert
    let delta = rx.try_recv()?;
    assert_eq!(delta.updates[0].timestamp, timestamp);
    assert_eq!(delta.source(), Some("tags.galley"));

    Ok(())
}

#[test]
fn test_closed_channel_sink_reports_send_error() {
    // Arrange
    let (tx, rx) = mpsc::unbounded_channel::<DeltaEvent>();
    drop(rx);
    let filter = EmissionFilter::new("ruuvitag", "ruuvitag", Rounding::default(), Arc::new(tx));

    // Act
    let result = filter.emit(&record(true, fixtures::outdoor_reading()));

    // Assert
    assert!(matches!(result, Err(TagfluxError::ChannelSendError)));
}

#[test]
fn test_closure_sink_accepts_every_delta() -> anyhow::Result<()> {
    let count = Arc::new(Mutex::new(0));
    let sink = {
        let count = count.clone();
        move |_: &str, _: DeltaEvent| *count.lock().unwrap() += 1
    };

    sink.handle_message("ruuvitag", DeltaEvent::default())?;
    sink.handle_message("ruuvitag", DeltaEvent::default())?;

    assert_eq!(*count.lock().unwrap(), 2);
    Ok(())
}
