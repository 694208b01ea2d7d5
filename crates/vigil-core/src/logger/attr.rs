//! Attribute key/value pairs carried by loggers and records.

use serde::Serialize;
use serde_json::Value;

/// A single named attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    /// Creates an attribute from an already-built JSON value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Creates an attribute from any serializable value.
///
/// Values that cannot be represented as JSON (for example a map with
/// non-string keys) are stringified instead of dropping the attribute.
///
/// # Example
///
/// ```
/// use vigil_core::attr;
///
/// let a = attr("status", 404);
/// assert_eq!(a.key, "status");
/// assert_eq!(a.value, serde_json::json!(404));
/// ```
pub fn attr<V>(key: impl Into<String>, value: V) -> Attr
where
    V: Serialize,
{
    let value = serde_json::to_value(&value)
        .unwrap_or_else(|e| Value::String(format!("!unserializable: {}", e)));
    Attr {
        key: key.into(),
        value,
    }
}
