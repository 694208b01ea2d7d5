mod common;

use common::{memory_logger, single_record, text_logger};
use vigil_core::{Level, RequestContext, Sanitizer, attr};

#[test]
fn test_structured_record_schema() {
    let (logger, sink) = memory_logger(Level::Debug);
    logger
        .with_request("req-9", "trace-9", "DELETE", "/users/1", "10.1.1.1")
        .warn("user_not_found", [attr("user_id", "1")]);

    let record = single_record(&sink);
    assert!(record["timestamp"].is_string());
    assert_eq!(record["severity"], "WARNING");
    assert_eq!(record["message"], "user_not_found");
    assert_eq!(record["request_id"], "req-9");
    assert_eq!(record["trace_id"], "trace-9");
    assert_eq!(record["user_id"], "1");
}

#[test]
fn test_every_level_maps_to_cloud_severity() {
    let (logger, sink) = memory_logger(Level::Debug);
    for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
        logger.log(level, "probe", []);
    }

    let severities: Vec<String> = sink
        .records()
        .iter()
        .map(|r| r["severity"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(severities, vec!["DEBUG", "INFO", "WARNING", "ERROR"]);
}

#[test]
fn test_text_format_is_not_json() {
    let (logger, sink) = text_logger(Level::Info);
    logger.info("plain", [attr("k", "v")]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(serde_json::from_str::<serde_json::Value>(&lines[0]).is_err());
    assert!(lines[0].contains("level=INFO"));
    assert!(lines[0].contains("k=v"));
}

#[test]
fn test_handler_logs_sanitized_user_data() {
    let (logger, sink) = memory_logger(Level::Info);
    let ctx = RequestContext::new("r", "t", logger.with_request("r", "t", "POST", "/users", ""));

    let payload = common::signup_payload();
    let log = RequestContext::logger_or_default(Some(&ctx));
    log.info(
        "creating_user",
        [attr("payload", Sanitizer::global().redact_deep(payload))],
    );

    let record = single_record(&sink);
    assert_eq!(record["payload"]["password"], vigil_core::REDACTED_MARKER);
    assert_eq!(record["request_id"], "r");
}

#[test]
fn test_error_record_has_stack() {
    let (logger, sink) = memory_logger(Level::Info);
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "db timed out");

    logger.with_error(&err).error("query_failed", []);

    let record = single_record(&sink);
    assert_eq!(record["error"], "db timed out");
    assert!(record["stack"].as_array().is_some_and(|s| !s.is_empty()));
}
