//! Decoding and sanitizing of `application/x-www-form-urlencoded` data.
//!
//! Query strings and form bodies share the same encoding. Pairs are grouped
//! by key in first-seen order; a key seen once maps to a string, a key seen
//! several times maps to an array.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use vigil_core::Sanitizer;

/// Splits and percent-decodes `a=1&b=2&a=3` into grouped pairs.
///
/// `+` decodes to a space. Pieces that are not valid UTF-8 once decoded are
/// kept as they appeared on the wire.
pub fn decode_pairs(raw: &str) -> IndexMap<String, Vec<String>> {
    let mut pairs: IndexMap<String, Vec<String>> = IndexMap::new();

    for piece in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
        pairs.entry(decode(key)).or_default().push(decode(value));
    }

    pairs
}

/// Sanitizes query parameters value by value with [`Sanitizer::redact_by_key`].
pub fn sanitize_query(query: Option<&str>, sanitizer: &Sanitizer) -> Value {
    let mut out = Map::new();

    for (key, values) in decode_pairs(query.unwrap_or_default()) {
        let value = if values.len() == 1 {
            let single = values.into_iter().next().unwrap_or_default();
            sanitizer.redact_by_key(&key, Value::String(single))
        } else {
            Value::Array(
                values
                    .into_iter()
                    .map(|v| sanitizer.redact_by_key(&key, Value::String(v)))
                    .collect(),
            )
        };
        out.insert(key, value);
    }

    Value::Object(out)
}

/// Decodes a form body into an object and runs it through
/// [`Sanitizer::redact_deep`].
pub fn sanitize_form(body: &[u8], sanitizer: &Sanitizer) -> Value {
    let raw = String::from_utf8_lossy(body);
    let mut out = Map::new();

    for (key, mut values) in decode_pairs(&raw) {
        let value = if values.len() == 1 {
            Value::String(values.remove(0))
        } else {
            Value::Array(values.into_iter().map(Value::String).collect())
        };
        out.insert(key, value);
    }

    sanitizer.redact_deep(Value::Object(out))
}

fn decode(piece: &str) -> String {
    let spaced = piece.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vigil_core::{REDACTED_MARKER, TOKEN_REDACTED_MARKER};

    #[test]
    fn decode_pairs_groups_repeated_keys_in_order() {
        let pairs = decode_pairs("b=1&a=x+y&b=2&flag");

        let keys: Vec<&str> = pairs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "flag"]);
        assert_eq!(pairs["b"], vec!["1", "2"]);
        assert_eq!(pairs["a"], vec!["x y"]);
        assert_eq!(pairs["flag"], vec![""]);
    }

    #[test]
    fn decode_pairs_percent_decodes() {
        let pairs = decode_pairs("q=caf%C3%A9&bad=%FF");

        assert_eq!(pairs["q"], vec!["café"]);
        assert_eq!(pairs["bad"], vec!["%FF"]);
    }

    #[test]
    fn sanitize_query_keeps_shape() {
        let sanitizer = Sanitizer::default();
        let value = sanitize_query(Some("page=2&tag=a&tag=b&api_key=k&token=t1&token=t2"), &sanitizer);

        assert_eq!(
            value,
            json!({
                "page": "2",
                "tag": ["a", "b"],
                "api_key": REDACTED_MARKER,
                "token": [REDACTED_MARKER, REDACTED_MARKER]
            })
        );
    }

    #[test]
    fn sanitize_query_checks_content() {
        let sanitizer = Sanitizer::default();
        let value = sanitize_query(Some("sig=aa.bb.cc&contact_email=johndoe%40x.com"), &sanitizer);

        assert_eq!(value["sig"], TOKEN_REDACTED_MARKER);
        assert_eq!(value["contact_email"], "jo*****@x.com");
    }

    #[test]
    fn sanitize_query_without_query_is_empty_object() {
        assert_eq!(sanitize_query(None, &Sanitizer::default()), json!({}));
    }

    #[test]
    fn sanitize_form_redacts_fields() {
        let sanitizer = Sanitizer::default();
        let value = sanitize_form(b"username=jo&password=hunter2&email=ab%40x.com", &sanitizer);

        assert_eq!(
            value,
            json!({"username": "jo", "password": REDACTED_MARKER, "email": "**@x.com"})
        );
    }
}
