//! Leveled, attribute-carrying logger.
//!
//! A [`Logger`] is a cheap, immutable view: a threshold, a format, a shared
//! sink and an attribute list. Enrichment (`with`, `with_request`, ...)
//! returns a new view and never touches the receiver, so one base logger can
//! be branched into many per-request loggers concurrently.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vigil_core::{Level, LogFormat, Logger, LoggerConfig, MemorySink, attr};
//!
//! let sink = Arc::new(MemorySink::new());
//! let base = Logger::with_sink(LoggerConfig::new(Level::Info, LogFormat::Structured), sink.clone());
//!
//! let req = base.with_request("req-1", "trace-1", "GET", "/users", "10.0.0.1");
//! req.info("fetching_users", [attr("page", 1)]);
//! req.debug("dropped", []);
//!
//! let records = sink.records();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0]["request_id"], "req-1");
//! assert_eq!(records[0]["page"], 1);
//! ```

mod attr;
mod config;
mod record;
mod sink;
mod stack;

use std::fmt;
use std::panic::Location;
use std::sync::{Arc, LazyLock};

pub use attr::{Attr, attr};
pub use config::LoggerConfig;
pub use record::{LogRecord, SourceLocation};
pub use sink::{LogSink, MemorySink, StdoutSink};
pub use stack::{MAX_STACK_DEPTH, StackFrame};

use crate::sanitize::mask_email;
use crate::types::{Level, LogFormat};

static DEFAULT_LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    Logger::from_config(LoggerConfig::new(Level::Info, LogFormat::Structured))
});

/// Structured logger handle.
#[derive(Clone)]
pub struct Logger {
    level: Level,
    format: LogFormat,
    sink: Arc<dyn LogSink>,
    attrs: Arc<[Attr]>,
}

impl Logger {
    /// Creates a stdout logger from raw level and format strings.
    ///
    /// Unknown or empty values fall back to `info` and text.
    pub fn new(level: &str, format: &str) -> Self {
        Self::from_config(LoggerConfig::parse(level, format))
    }

    /// Creates a stdout logger from a typed config.
    pub fn from_config(config: LoggerConfig) -> Self {
        Self::with_sink(config, Arc::new(StdoutSink))
    }

    /// Creates a logger writing to the given sink.
    pub fn with_sink(config: LoggerConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            level: config.level,
            format: config.format,
            sink,
            attrs: Arc::from(Vec::new()),
        }
    }

    /// The process-wide default logger: `info`, structured, stdout.
    ///
    /// Built on first use and never modified afterwards.
    pub fn global_default() -> &'static Logger {
        &DEFAULT_LOGGER
    }

    /// Returns the threshold.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the output format.
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Returns the attributes attached to every record.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Returns true if records at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Returns a logger that adds `attrs` to every record.
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        let merged: Vec<Attr> = self.attrs.iter().cloned().chain(attrs).collect();
        Logger {
            level: self.level,
            format: self.format,
            sink: Arc::clone(&self.sink),
            attrs: Arc::from(merged),
        }
    }

    /// Adds the correlation and routing fields of an HTTP request.
    pub fn with_request(
        &self,
        request_id: &str,
        trace_id: &str,
        method: &str,
        path: &str,
        remote_addr: &str,
    ) -> Logger {
        self.with([
            attr("request_id", request_id),
            attr("trace_id", trace_id),
            attr("method", method),
            attr("path", path),
            attr("remote_addr", remote_addr),
        ])
    }

    /// Adds the acting user. The address is masked before it is stored.
    pub fn with_user(&self, user_id: &str, email: &str) -> Logger {
        self.with([attr("user_id", user_id), attr("user_email", mask_email(email))])
    }

    /// Adds an error message and a stack snapshot taken at the call site.
    #[track_caller]
    pub fn with_error(&self, err: &(dyn std::error::Error + 'static)) -> Logger {
        let stack = stack::capture(Location::caller());
        self.with([attr("error", err.to_string()), attr("stack", stack)])
    }

    /// Emits a record if `level` is at or above the threshold.
    ///
    /// A failing sink is reported through `tracing` and otherwise ignored.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        if !self.enabled(level) {
            return;
        }

        let all: Vec<Attr> = self.attrs.iter().cloned().chain(attrs).collect();
        let record = LogRecord::new(level, message, all)
            .with_source(SourceLocation::from(Location::caller()));
        let line = self.format.formatter().format(&record);

        if let Err(e) = self.sink.write_line(&line) {
            tracing::warn!(error = %e, record = %record.message, "Failed to write log record");
        }
    }

    #[track_caller]
    pub fn debug(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Debug, message, attrs);
    }

    #[track_caller]
    pub fn info(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Info, message, attrs);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Warn, message, attrs);
    }

    #[track_caller]
    pub fn error(&self, message: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::Error, message, attrs);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::global_default().clone()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("format", &self.format)
            .field("attrs", &self.attrs.len())
            .finish()
    }
}
