#![allow(dead_code)]
use std::sync::Arc;

use serde_json::Value;
use vigil_core::{Level, LogFormat, Logger, LoggerConfig, MemorySink};

/// Helper to create a structured logger writing into memory.
pub fn memory_logger(level: Level) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_sink(LoggerConfig::new(level, LogFormat::Structured), sink.clone());
    (logger, sink)
}

/// Helper to create a text logger writing into memory.
pub fn text_logger(level: Level) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_sink(LoggerConfig::new(level, LogFormat::Text), sink.clone());
    (logger, sink)
}

/// Returns the only record in the sink.
/// Panics if there is not exactly one (intended for tests).
pub fn single_record(sink: &MemorySink) -> Value {
    let mut records = sink.records();
    assert_eq!(records.len(), 1, "expected exactly one record: {:?}", sink.lines());
    records.remove(0)
}

/// Returns a signup payload fixture with nested secrets.
pub fn signup_payload() -> Value {
    serde_json::json!({
        "email": "johndoe@example.com",
        "username": "johndoe",
        "password": "hunter2",
        "profile": {
            "fullName": "John Doe",
            "payment": {"credit_card": "4111111111111111", "expiry": "12/29"}
        },
        "devices": [
            {"name": "laptop", "refresh_token": "r1"},
            {"name": "phone", "session": "Bearer abc"}
        ]
    })
}
