//! Error types for Vigil.
//!
//! Errors here only surface from strict parsing APIs and from log sinks.
//! The logger and sanitizer themselves degrade instead of failing: a bad
//! level string falls back to `info`, an unparseable body becomes `{}`, a
//! failed sink write is noted through `tracing` and dropped.
//!
//! # Example
//!
//! ```
//! use vigil_core::{Level, VigilError};
//!
//! let err = "verbose".parse::<Level>().unwrap_err();
//! assert!(err.is_invalid_level());
//! assert!(err.to_string().contains("verbose"));
//! ```

use std::io;
use thiserror::Error;

/// Main error type for Vigil operations.
#[derive(Debug, Error)]
pub enum VigilError {
    /// A log level string did not name a known level.
    #[error("Invalid log level '{value}': expected one of debug, info, warn, error")]
    InvalidLevel {
        /// The rejected input
        value: String,
    },

    /// A log format string did not name a known format.
    #[error("Invalid log format '{value}': expected one of json, structured, text, plain")]
    InvalidFormat {
        /// The rejected input
        value: String,
    },

    /// Writing a record to the sink failed.
    #[error("Log sink error: {0}")]
    Sink(#[from] io::Error),
}

impl VigilError {
    /// Creates an InvalidLevel error.
    pub fn invalid_level(value: impl Into<String>) -> Self {
        Self::InvalidLevel {
            value: value.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(value: impl Into<String>) -> Self {
        Self::InvalidFormat {
            value: value.into(),
        }
    }

    /// Returns true if a level string was rejected.
    pub fn is_invalid_level(&self) -> bool {
        matches!(self, Self::InvalidLevel { .. })
    }

    /// Returns true if a format string was rejected.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }

    /// Returns true if this came from the log sink.
    pub fn is_sink_error(&self) -> bool {
        matches!(self, Self::Sink(_))
    }
}

/// Type alias for Results with VigilError.
pub type Result<T> = std::result::Result<T, VigilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_display() {
        let error = VigilError::invalid_level("loud");
        let msg = format!("{}", error);

        assert!(msg.contains("loud"));
        assert!(msg.contains("debug"));
        assert!(error.is_invalid_level());
        assert!(!error.is_invalid_format());
    }

    #[test]
    fn test_invalid_format_display() {
        let error = VigilError::invalid_format("xml");

        assert!(error.is_invalid_format());
        assert!(format!("{}", error).contains("xml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let vigil_error: VigilError = io_error.into();

        assert!(vigil_error.is_sink_error());
        assert!(vigil_error.to_string().contains("pipe closed"));
    }
}
