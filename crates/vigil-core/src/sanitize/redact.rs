//! Key- and content-based redaction of JSON-like documents.

use std::sync::LazyLock;

use serde_json::{Map, Value};

use super::email::mask_email_local;
use super::fields::SensitiveFieldSet;

/// Replaces values stored under sensitive keys.
pub const REDACTED_MARKER: &str = "***REDACTED***";

/// Replaces values that look like bearer or three-part signed tokens.
pub const TOKEN_REDACTED_MARKER: &str = "***JWT_REDACTED***";

const BEARER_PREFIX: &str = "Bearer ";

static DEFAULT_SANITIZER: LazyLock<Sanitizer> = LazyLock::new(Sanitizer::default);

/// Redacts sensitive values from key/value pairs and whole documents.
///
/// The sanitizer owns its [`SensitiveFieldSet`]; it never changes after
/// construction and can be shared freely across requests.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vigil_core::{Sanitizer, REDACTED_MARKER};
///
/// let sanitizer = Sanitizer::default();
/// let doc = sanitizer.redact_deep(json!({"user": {"password": "x", "name": "Jo"}}));
///
/// assert_eq!(doc["user"]["password"], REDACTED_MARKER);
/// assert_eq!(doc["user"]["name"], "Jo");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    fields: SensitiveFieldSet,
}

impl Sanitizer {
    /// Creates a sanitizer over the given field set.
    pub fn new(fields: SensitiveFieldSet) -> Self {
        Self { fields }
    }

    /// Process-wide sanitizer over the default field set.
    pub fn global() -> &'static Sanitizer {
        &DEFAULT_SANITIZER
    }

    /// Returns the field set in use.
    pub fn fields(&self) -> &SensitiveFieldSet {
        &self.fields
    }

    /// Redacts a single value given the key it is stored under.
    ///
    /// Sensitive keys always yield [`REDACTED_MARKER`]. String values are
    /// also checked by content: bearer tokens and strings with exactly two
    /// dots yield [`TOKEN_REDACTED_MARKER`], and addresses stored under a
    /// key containing `email` get their local part masked.
    pub fn redact_by_key(&self, key: &str, value: Value) -> Value {
        if self.fields.matches(key) {
            return Value::String(REDACTED_MARKER.to_string());
        }

        let Value::String(text) = value else {
            return value;
        };

        if looks_like_token(&text) {
            return Value::String(TOKEN_REDACTED_MARKER.to_string());
        }

        if key.to_lowercase().contains("email") && text.contains('@') {
            if let Some(masked) = mask_email_local(&text) {
                // Masking can hide dots of the local part; keep the result a
                // fixed point of this function.
                if looks_like_token(&masked) {
                    return Value::String(TOKEN_REDACTED_MARKER.to_string());
                }
                return Value::String(masked);
            }
        }

        Value::String(text)
    }

    /// Recursively redacts a document.
    ///
    /// Every object entry is redacted by key after its value has been
    /// walked, so sensitive keys nested anywhere are caught. Scalars outside
    /// objects pass through.
    pub fn redact_deep(&self, document: Value) -> Value {
        match document {
            Value::Object(map) => {
                let redacted: Map<String, Value> = map
                    .into_iter()
                    .map(|(key, value)| {
                        let walked = self.redact_deep(value);
                        let value = self.redact_by_key(&key, walked);
                        (key, value)
                    })
                    .collect();
                Value::Object(redacted)
            }
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.redact_deep(v)).collect())
            }
            scalar => scalar,
        }
    }

    /// Parses raw bytes as JSON and redacts the result.
    ///
    /// Input that does not parse yields an empty object.
    pub fn redact_json_bytes(&self, bytes: &[u8]) -> Value {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(document) => self.redact_deep(document),
            Err(_) => Value::Object(Map::new()),
        }
    }
}

/// Heuristic for bearer credentials and three-part signed tokens.
fn looks_like_token(text: &str) -> bool {
    text.starts_with(BEARER_PREFIX) || text.matches('.').count() == 2
}
