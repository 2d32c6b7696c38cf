// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types for the tagflux sensor pipeline.
//!
//! This crate holds everything that does not need a runtime:
//!
//! - **[`SourceId`]**, **[`RawReading`]**: what discovery hands us
//! - **[`SourceConfig`]**, **[`ConfigStore`]**: per-source user settings with defaults
//! - **[`LocationPolicy`]**: the two supported location/addressing schemes
//! - **[`normalize`]**: the pure reading → [`MeasurementRecord`] transformation
//! - **[`DeltaEvent`]**: the wire record handed to the host sink
//! - **[`TagSubject`]**: hot broadcast used to share a source's reading feed
//! - **[`Discovery`]**: the capability seam towards the radio transport

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod config;
pub mod config_store;
pub mod delta;
pub mod discovery;
pub mod location;
mod logging;
pub mod normalize;
pub mod reading;
pub mod source_id;
pub mod subject;

pub use self::config::{SourceConfig, SourceConfigPatch, MAX_NAME_LEN};
pub use self::config_store::ConfigStore;
pub use self::delta::{DeltaEvent, PathValue, Rounding, Update};
pub use self::discovery::{Discovery, FoundSource, FoundStream, ReadingStream};
pub use self::location::{HumidityKey, LocationPolicy, ResolvedLocation};
pub use self::normalize::{normalize, MeasurementRecord, NormalizeOptions};
pub use self::reading::{RawReading, ReadingKind, SourceReading};
pub use self::source_id::SourceId;
pub use self::subject::TagSubject;
pub use tagflux_error::{Result, ResultExt, TagfluxError};
