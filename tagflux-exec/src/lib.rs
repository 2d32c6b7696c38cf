// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Running a reading pipeline and handing its output to the host.
//!
//! - [`SubscribeExt::subscribe`] drives a stream to completion with a sequential async
//!   handler and stops promptly when its cancellation token fires.
//! - [`DeltaSink`] is the host-side receiver of emitted [`DeltaEvent`]s.
//! - [`EmissionFilter`] turns enabled measurement records into deltas and forwards them.
//!
//! [`DeltaEvent`]: tagflux_core::DeltaEvent

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;
pub mod emission;
pub mod sink;
pub mod subscribe;

pub use emission::EmissionFilter;
pub use sink::DeltaSink;
pub use subscribe::SubscribeExt;
pub use tokio_util::sync::CancellationToken;
