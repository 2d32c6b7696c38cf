// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the tagflux sensor ingestion pipeline
//!
//! None of these errors is fatal to a running pipeline. They surface at the edges
//! (discovery initialization, configuration edits, lifecycle calls) where the caller
//! decides how to degrade.
//!
//! # Examples
//!
//! ```
//! use tagflux_error::{TagfluxError, Result};
//!
//! fn rename(name: &str) -> Result<()> {
//!     Err(TagfluxError::invalid_config("AA:BB:CC", "name", format!("'{name}' is empty")))
//! }
//! ```

/// Root error type for all tagflux operations
#[derive(Debug, thiserror::Error)]
pub enum TagfluxError {
    /// The discovery capability could not be initialized
    ///
    /// Typically the radio hardware is absent or the platform is unsupported.
    /// The registry degrades to an idle, empty source set when this happens.
    #[error("Discovery unavailable: {reason}")]
    DiscoveryUnavailable {
        /// What the discovery backend reported
        reason: String,
    },

    /// A configuration field failed validation
    #[error("Invalid configuration for {id}: field '{field}' {reason}")]
    InvalidConfig {
        /// Source the configuration belongs to
        id: String,
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A subject or registry has been closed and cannot accept subscribers
    #[error("Subscription refused: {resource} is closed")]
    Closed {
        /// Name of the closed resource
        resource: &'static str,
    },

    /// Channel send operation failed
    ///
    /// This occurs when attempting to send to a channel whose receiver
    /// has been dropped.
    #[error("Channel send failed: receiver dropped")]
    ChannelSendError,

    /// A lifecycle call needs a Tokio runtime and none is active
    #[error("No async runtime available: {operation}")]
    RuntimeUnavailable {
        /// The lifecycle operation that was attempted
        operation: String,
    },

    /// Invalid state encountered
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state
        message: String,
    },

    /// Error produced by an external collaborator (discovery backend, sink)
    #[error("External error: {0}")]
    External(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TagfluxError {
    /// Create a discovery-unavailable error with the given reason
    pub fn discovery_unavailable(reason: impl Into<String>) -> Self {
        Self::DiscoveryUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a configuration validation error
    pub fn invalid_config(
        id: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfig {
            id: id.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Create a closed-resource error
    #[must_use]
    pub const fn closed(resource: &'static str) -> Self {
        Self::Closed { resource }
    }

    /// Create a runtime-unavailable error for the given operation
    pub fn runtime_unavailable(operation: impl Into<String>) -> Self {
        Self::RuntimeUnavailable {
            operation: operation.into(),
        }
    }

    /// Create an invalid state error with the given message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Wrap an error raised by an external collaborator
    pub fn external(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::External(Box::new(error))
    }

    /// Check if the pipeline recovers from this error by falling back to a default
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DiscoveryUnavailable { .. } | Self::InvalidConfig { .. }
        )
    }

    /// Check if this error indicates a permanent failure of the resource involved
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::Closed { .. } | Self::ChannelSendError | Self::InvalidState { .. }
        )
    }
}

/// Specialized Result type for tagflux operations
pub type Result<T> = std::result::Result<T, TagfluxError>;

/// Extension trait for converting foreign errors into `TagfluxError`
pub trait IntoTagfluxError {
    /// Convert this error into a `TagfluxError`
    fn into_tagflux(self) -> TagfluxError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoTagfluxError for E {
    fn into_tagflux(self) -> TagfluxError {
        TagfluxError::external(self)
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// External errors are folded into an `InvalidState` carrying the context;
    /// every other variant is preserved as-is.
    ///
    /// # Errors
    /// Returns `Err(TagfluxError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(TagfluxError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<TagfluxError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach(e.into(), context.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach(e.into(), f()))
    }
}

fn attach(error: TagfluxError, context: String) -> TagfluxError {
    match error {
        TagfluxError::External(inner) => TagfluxError::InvalidState {
            message: format!("{context}: {inner}"),
        },
        other => other,
    }
}
