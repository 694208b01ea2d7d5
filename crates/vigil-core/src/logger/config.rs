//! Logger construction settings.

use serde::{Deserialize, Serialize};

use crate::types::{Level, LogFormat};

/// Threshold and output format of a logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggerConfig {
    /// Creates a config from typed values.
    pub fn new(level: Level, format: LogFormat) -> Self {
        Self { level, format }
    }

    /// Creates a config from raw strings. Unknown level falls back to
    /// `info`, unknown format to text.
    pub fn parse(level: &str, format: &str) -> Self {
        Self {
            level: Level::parse_or_default(level),
            format: LogFormat::parse_or_default(format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_falls_back_to_defaults() {
        let config = LoggerConfig::parse("", "");
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn parse_accepts_known_values() {
        let config = LoggerConfig::parse("debug", "json");
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.format, LogFormat::Structured);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let config: LoggerConfig = serde_json::from_str(r#"{"level":"warn"}"#).unwrap();
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.format, LogFormat::Text);
    }
}
