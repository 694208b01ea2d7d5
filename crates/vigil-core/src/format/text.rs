//! Compact `key=value` lines for humans.

use chrono::SecondsFormat;
use serde_json::Value;

use crate::format::RecordFormatter;
use crate::logger::LogRecord;

pub struct TextFormatter;

impl RecordFormatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut line = String::with_capacity(128);

        push_pair(
            &mut line,
            "time",
            &record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        );
        push_pair(
            &mut line,
            "level",
            &record.level.as_str().to_ascii_uppercase(),
        );
        if let Some(source) = record.source {
            push_pair(&mut line, "source", &format!("{}:{}", source.file, source.line));
        }
        push_pair(&mut line, "msg", &record.message);

        for attr in &record.attrs {
            let rendered = match &attr.value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            push_pair(&mut line, &attr.key, &rendered);
        }

        line
    }
}

fn push_pair(line: &mut String, key: &str, value: &str) {
    if !line.is_empty() {
        line.push(' ');
    }
    push_token(line, key);
    line.push('=');
    push_token(line, value);
}

fn push_token(line: &mut String, token: &str) {
    if needs_quoting(token) {
        line.push_str(&format!("{:?}", token));
    } else {
        line.push_str(token);
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '=' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::attr;
    use crate::types::Level;

    #[test]
    fn renders_envelope_and_attrs() {
        let record = LogRecord::new(
            Level::Info,
            "http_request_started",
            vec![attr("method", "GET"), attr("status", 200)],
        );
        let line = TextFormatter.format(&record);

        assert!(line.starts_with("time="));
        assert!(line.contains(" level=INFO "));
        assert!(line.contains(" msg=http_request_started"));
        assert!(line.contains(" method=GET"));
        assert!(line.ends_with(" status=200"));
    }

    #[test]
    fn quotes_values_with_spaces_and_escapes_newlines() {
        let record = LogRecord::new(
            Level::Warn,
            "two words",
            vec![attr("agent", "curl/8.0 (linux)"), attr("multi", "a\nb"), attr("empty", "")],
        );
        let line = TextFormatter.format(&record);

        assert!(line.contains("msg=\"two words\""));
        assert!(line.contains("agent=\"curl/8.0 (linux)\""));
        assert!(line.contains("multi=\"a\\nb\""));
        assert!(line.contains("empty=\"\""));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn nested_values_render_as_json() {
        let record = LogRecord::new(
            Level::Debug,
            "body",
            vec![attr("body", serde_json::json!({"a":1}))],
        );
        let line = TextFormatter.format(&record);

        assert!(line.contains(r#"body="{\"a\":1}""#));
        assert!(line.contains("level=DEBUG"));
    }

    #[test]
    fn quotes_keys_that_would_break_pairs() {
        let record = LogRecord::new(
            Level::Info,
            "msg",
            vec![attr("user agent", "x"), attr("a=b", "c"), attr("plain", "d")],
        );
        let line = TextFormatter.format(&record);

        assert!(line.contains(r#" "user agent"=x"#));
        assert!(line.contains(r#" "a=b"=c"#));
        assert!(line.ends_with(" plain=d"));
    }
}
