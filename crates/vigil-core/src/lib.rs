//! Vigil Core - structured logging and redaction
//!
//! This crate provides the observability core shared by the Vigil HTTP
//! middleware and any handler that logs user-supplied data:
//!
//! - [`Sanitizer`]: redacts secrets by key and by content, recursively
//! - [`Logger`]: leveled, attribute-carrying logger with a cloud-logging
//!   structured format and a plain text format
//! - [`RequestContext`]: per-request identifiers plus the bound logger

pub mod context;
pub mod error;
pub mod format;
pub mod logger;
pub mod sanitize;
pub mod types;

pub use context::RequestContext;
pub use error::{Result, VigilError};
pub use logger::{
    Attr, LogRecord, LogSink, Logger, LoggerConfig, MemorySink, SourceLocation, StackFrame,
    StdoutSink, attr,
};
pub use sanitize::{
    REDACTED_MARKER, Sanitizer, SensitiveFieldSet, TOKEN_REDACTED_MARKER, mask_email,
};
pub use types::{Level, LogFormat};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
