//! Level and output format definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VigilError;

/// Severity of a log record.
///
/// Levels are totally ordered: `Debug < Info < Warn < Error`. A logger
/// emits a record only when the record's level is at or above its
/// threshold.
///
/// # Example
///
/// ```
/// use vigil_core::Level;
///
/// assert!(Level::Warn > Level::Info);
/// assert_eq!(Level::parse_or_default("WARN"), Level::Warn);
/// assert_eq!(Level::parse_or_default(""), Level::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parses a level, falling back to `info` for unknown or empty input.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Returns the lowercase internal name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(VigilError::invalid_level(s)),
        }
    }
}

/// Serialization format for emitted records.
///
/// `Structured` produces one JSON object per line with cloud-logging field
/// names; `Text` produces a compact `key=value` line for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Structured,
    #[default]
    Text,
}

impl LogFormat {
    /// Parses a format, falling back to text for unknown or empty input.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Structured => f.write_str("structured"),
            LogFormat::Text => f.write_str("text"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "structured" => Ok(LogFormat::Structured),
            "text" | "plain" | "plain-text" => Ok(LogFormat::Text),
            _ => Err(VigilError::invalid_format(s)),
        }
    }
}
