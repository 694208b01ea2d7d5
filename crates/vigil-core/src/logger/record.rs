//! The emitted log record.

use std::panic::Location;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::attr::Attr;
use crate::types::Level;

/// Call site of a log statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl From<&'static Location<'static>> for SourceLocation {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// One log record, built by the logger at emission time.
///
/// Attributes keep insertion order: logger attributes first, then the
/// attributes passed with the call.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub attrs: Vec<Attr>,
    pub source: Option<SourceLocation>,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    pub fn new(level: Level, message: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            attrs,
            source: None,
        }
    }

    /// Attaches the call site.
    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }
}
