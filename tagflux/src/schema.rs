// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! JSON-schema projection of the per-source settings, for host configuration UIs.

use serde_json::{json, Map, Value};
use tagflux_core::location::MAX_LOCATION_LEN;
use tagflux_core::{ConfigStore, LocationPolicy, SourceId, MAX_NAME_LEN};

const NAME_PATTERN: &str = "^[a-zA-Z0-9]+$";

fn location_description(policy: LocationPolicy) -> String {
    match policy {
        LocationPolicy::ShortLocation => format!(
            "environment.inside instance ID (e.g. 'mainCabin'), 'inside' for generic inside, \
             blank for generic outside. Length: 0-{MAX_LOCATION_LEN}, valid characters: a-z, A-Z, 0-9"
        ),
        LocationPolicy::DottedPath => format!(
            "Path below environment (e.g. 'inside.mainCabin' or 'outside.flybridge'). \
             Length: 0-{MAX_LOCATION_LEN}, valid characters: a-z, A-Z, 0-9 and '.'"
        ),
    }
}

fn source_entry(id: &SourceId, policy: LocationPolicy) -> Value {
    json!({
        "title": format!("Tag {id}"),
        "type": "object",
        "properties": {
            "enabled": {
                "title": "Enabled. Receive data and emit values",
                "type": "boolean",
                "default": false
            },
            "name": {
                "title": "Source name",
                "description": format!("Length: 1-{MAX_NAME_LEN}, valid characters: a-z, A-Z, 0-9"),
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_NAME_LEN,
                "pattern": NAME_PATTERN,
                "default": id.short_name()
            },
            "location": {
                "title": "Location",
                "description": location_description(policy),
                "type": "string",
                "maxLength": MAX_LOCATION_LEN,
                "pattern": policy.location_pattern()
            }
        }
    })
}

/// Builds the schema with one object entry per source known to `store`.
pub fn schema(store: &ConfigStore) -> Value {
    let policy = store.policy();
    let properties: Map<String, Value> = store
        .ids()
        .iter()
        .map(|id| (id.to_string(), source_entry(id, policy)))
        .collect();

    json!({
        "title": "",
        "type": "object",
        "properties": properties
    })
}
