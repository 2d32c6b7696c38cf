// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io;
use tagflux_error::{IntoTagfluxError, Result, ResultExt, TagfluxError};

#[test]
fn test_error_display() {
    let err = TagfluxError::discovery_unavailable("no bluetooth adapter");
    assert_eq!(
        err.to_string(),
        "Discovery unavailable: no bluetooth adapter"
    );

    let err = TagfluxError::invalid_config("AA:BB:CC", "name", "must be alphanumeric");
    assert_eq!(
        err.to_string(),
        "Invalid configuration for AA:BB:CC: field 'name' must be alphanumeric"
    );

    let err = TagfluxError::closed("source registry");
    assert_eq!(
        err.to_string(),
        "Subscription refused: source registry is closed"
    );
}

#[test]
fn test_error_constructors() {
    let err = TagfluxError::runtime_unavailable("start");
    assert!(matches!(err, TagfluxError::RuntimeUnavailable { .. }));

    let err = TagfluxError::invalid_state("already stopped");
    assert!(matches!(err, TagfluxError::InvalidState { .. }));

    let err = io::Error::other("adapter busy").into_tagflux();
    assert!(matches!(err, TagfluxError::External(_)));
}

#[test]
fn test_is_recoverable() {
    assert!(TagfluxError::discovery_unavailable("test").is_recoverable());
    assert!(TagfluxError::invalid_config("id", "location", "too long").is_recoverable());
    assert!(!TagfluxError::closed("subject").is_recoverable());
    assert!(!TagfluxError::external(io::Error::other("test")).is_recoverable());
}

#[test]
fn test_is_permanent() {
    assert!(TagfluxError::closed("subject").is_permanent());
    assert!(TagfluxError::ChannelSendError.is_permanent());
    assert!(!TagfluxError::discovery_unavailable("test").is_permanent());
}

#[test]
fn test_result_context_wraps_external_errors() {
    let result: Result<()> = Err(TagfluxError::External("radio reset".into()));

    let err = result.context("listening for tags").unwrap_err();
    assert!(matches!(err, TagfluxError::InvalidState { .. }));
    assert!(err.to_string().contains("listening for tags"));
    assert!(err.to_string().contains("radio reset"));
}

#[test]
fn test_result_context_preserves_domain_errors() {
    let result: Result<()> = Err(TagfluxError::invalid_config("id", "name", "empty"));

    let err = result.with_context(|| "applying edit".to_string()).unwrap_err();
    assert!(matches!(err, TagfluxError::InvalidConfig { .. }));
}

#[test]
fn test_result_context_ok() {
    let result: Result<i32> = Ok(42);
    let value = result.context("operation failed").unwrap();
    assert_eq!(value, 42);
}
