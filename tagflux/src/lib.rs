// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # tagflux
//!
//! Turns a changing population of BLE environment sensor tags into one stream of
//! normalized, timestamped deltas.
//!
//! ## Overview
//!
//! Tags are discovered at runtime. Each newly seen tag gets a default configuration
//! (named after its id, disabled), its reading feed is merged with every other tag's
//! feed, and each reading is converted to SI units and addressed by the tag's
//! configured location. Only tags the user has enabled reach the host sink.
//!
//! ## Crates
//!
//! - `tagflux-core`: ids, readings, configuration, normalization, deltas
//! - `tagflux-stream`: source registry and dynamic fan-in merge
//! - `tagflux-exec`: subscription loop, sink seam, emission filter
//! - `tagflux`: the [`TagPlugin`] lifecycle tying them together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use std::sync::Arc;
//! use tagflux::prelude::*;
//!
//! # fn transport() -> Arc<dyn Discovery> { unimplemented!() }
//! #[tokio::main]
//! async fn main() -> Result<(), TagfluxError> {
//!     let (tx, mut deltas) = tokio::sync::mpsc::unbounded_channel::<DeltaEvent>();
//!     let plugin = TagPlugin::new(transport(), Arc::new(tx), PluginOptions::default());
//!
//!     plugin.start(&json!({}))?;
//!     while let Some(delta) = deltas.recv().await {
//!         println!("{}", serde_json::to_string(&delta).unwrap());
//!     }
//!     Ok(())
//! }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;
pub mod discovery_state;
pub mod options;
mod pipeline;
pub mod plugin;
pub mod schema;

pub use discovery_state::DiscoveryState;
pub use options::{PluginOptions, DEFAULT_SOURCE_PREFIX};
pub use plugin::{TagPlugin, PLUGIN_DESCRIPTION, PLUGIN_ID, PLUGIN_NAME};

pub use tagflux_core::{
    DeltaEvent, Discovery, FoundSource, FoundStream, LocationPolicy, RawReading, ReadingKind,
    ReadingStream, Result, Rounding, SourceConfig, SourceConfigPatch, SourceId, TagfluxError,
};
pub use tagflux_exec::DeltaSink;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{PluginOptions, TagPlugin};
    pub use tagflux_core::{
        DeltaEvent, Discovery, FoundSource, LocationPolicy, RawReading, SourceConfigPatch,
        SourceId, TagfluxError,
    };
    pub use tagflux_exec::DeltaSink;
}
