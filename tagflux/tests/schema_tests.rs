// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde_json::json;
use tagflux::schema::schema;
use tagflux::{LocationPolicy, PluginOptions, SourceId};
use tagflux_core::ConfigStore;

#[test]
fn test_schema_lists_every_known_source() {
    // Arrange
    let store = ConfigStore::new(LocationPolicy::ShortLocation);
    store.ensure_default(&SourceId::new("c4a1d2e3f4a5"));
    store.ensure_default(&SourceId::new("d5b2e3f4a5b6"));

    // Act
    let schema = schema(&store);

    // Assert
    assert_eq!(schema["type"], "object");
    let properties = schema["properties"].as_object().expect("properties");
    assert_eq!(properties.len(), 2);
    let entry = &properties["c4a1d2e3f4a5"];
    assert_eq!(entry["title"], "Tag c4a1d2e3f4a5");
    assert_eq!(entry["properties"]["enabled"]["default"], false);
    assert_eq!(entry["properties"]["name"]["default"], "c4a1d2");
    assert_eq!(entry["properties"]["name"]["maxLength"], 12);
    assert_eq!(entry["properties"]["name"]["pattern"], "^[a-zA-Z0-9]+$");
    assert_eq!(entry["properties"]["location"]["maxLength"], 20);
    assert_eq!(entry["properties"]["location"]["pattern"], "^[a-zA-Z0-9]*$");
}

#[test]
fn test_schema_location_pattern_follows_policy() {
    let store = ConfigStore::new(LocationPolicy::DottedPath);
    store.ensure_default(&SourceId::new("c4a1d2e3f4a5"));

    let schema = schema(&store);

    assert_eq!(
        schema["properties"]["c4a1d2e3f4a5"]["properties"]["location"]["pattern"],
        "^[a-zA-Z0-9.]*$"
    );
}

#[test]
fn test_empty_store_has_no_properties() {
    let schema = schema(&ConfigStore::default());
    assert_eq!(schema["properties"], json!({}));
}

#[test]
fn test_plugin_options_from_json() -> anyhow::Result<()> {
    // Arrange
    let value = json!({
        "locationPolicy": "dottedPath",
        "normalizeAcceleration": false,
        "rounding": { "temperature": 1 }
    });

    // Act
    let options = PluginOptions::from_json(&value)?;

    // Assert
    assert_eq!(options.location_policy, LocationPolicy::DottedPath);
    assert!(!options.normalize_acceleration);
    assert_eq!(options.source_prefix, "ruuvitag");
    assert_eq!(options.rounding.temperature, 1);
    assert_eq!(options.rounding.pressure, 0);

    Ok(())
}

#[test]
fn test_plugin_options_reject_wrong_shape() {
    let result = PluginOptions::from_json(&json!({ "normalizeAcceleration": "yes" }));
    assert!(result.is_err());
}
