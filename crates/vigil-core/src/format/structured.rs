//! One JSON object per line, shaped for a cloud log aggregator.

use chrono::SecondsFormat;
use serde_json::{Map, Value, json};

use crate::format::RecordFormatter;
use crate::logger::LogRecord;

/// Top-level fields owned by the formatter.
const RESERVED_KEYS: &[&str] = &["timestamp", "severity", "message", "source"];

/// Maps an internal level name to the aggregator's severity vocabulary.
///
/// ```
/// use vigil_core::format::cloud_severity;
///
/// assert_eq!(cloud_severity("warn"), "WARNING");
/// assert_eq!(cloud_severity("trace"), "DEFAULT");
/// ```
pub fn cloud_severity(level: &str) -> &'static str {
    match level {
        "debug" => "DEBUG",
        "info" => "INFO",
        "warn" => "WARNING",
        "error" => "ERROR",
        _ => "DEFAULT",
    }
}

pub struct StructuredFormatter;

impl RecordFormatter for StructuredFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut obj = Map::new();
        obj.insert(
            "timestamp".to_string(),
            json!(record.timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)),
        );
        obj.insert(
            "severity".to_string(),
            json!(cloud_severity(record.level.as_str())),
        );
        obj.insert("message".to_string(), json!(record.message));

        if let Some(source) = record.source {
            obj.insert(
                "source".to_string(),
                json!({"file": source.file, "line": source.line}),
            );
        }

        for attr in &record.attrs {
            // Attributes must not shadow the record envelope.
            let key = if RESERVED_KEYS.contains(&attr.key.as_str()) {
                format!("attr.{}", attr.key)
            } else {
                attr.key.clone()
            };
            obj.insert(key, attr.value.clone());
        }

        serde_json::to_string(&Value::Object(obj)).unwrap_or_else(|e| {
            json!({
                "severity": cloud_severity(record.level.as_str()),
                "message": record.message,
                "format_error": e.to_string(),
            })
            .to_string()
        })
    }
}
