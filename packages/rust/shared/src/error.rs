//! Error types for VoyageLog.
//!
//! Library crates use [`VoyageLogError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all VoyageLog operations.
#[derive(Debug, thiserror::Error)]
pub enum VoyageLogError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching the chapter list.
    #[error("network error: {0}")]
    Network(String),

    /// Location or JSON parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The chapter list could not be fetched or decoded.
    ///
    /// Terminal for the current page view: callers show a message and skip
    /// resolution and composition entirely.
    #[error("chapter data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VoyageLogError>;

impl VoyageLogError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a data-unavailable error for the named source.
    pub fn data_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the chapter list never arrived.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}
