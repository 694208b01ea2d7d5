//! Destinations for serialized records.

use std::fmt;
use std::io::{self, Write};

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::Result;

/// Receives one serialized record at a time.
///
/// Implementations must write each line atomically with respect to other
/// writers, so records from concurrent requests never interleave within a
/// line.
pub trait LogSink: Send + Sync + fmt::Debug {
    /// Writes one record. `line` carries no trailing newline.
    ///
    /// I/O failures surface as [`VigilError::Sink`](crate::VigilError::Sink).
    fn write_line(&self, line: &str) -> Result<()>;
}

/// Writes records to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut out = io::stdout().lock();
        out.write_all(&buf)?;
        out.flush()?;
        Ok(())
    }
}

/// Keeps records in memory.
///
/// Useful for embedding the logger in tools that ship records elsewhere and
/// for asserting on output in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Parses every line as JSON, skipping lines that are not JSON.
    pub fn records(&self) -> Vec<Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Returns the parsed records whose `message` equals `message`.
    pub fn records_with_message(&self, message: &str) -> Vec<Value> {
        self.records()
            .into_iter()
            .filter(|r| r["message"] == message)
            .collect()
    }

    /// Drops everything written so far.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> Result<()> {
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
