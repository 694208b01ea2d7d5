//! Call-stack snapshots for error records.

use std::backtrace::Backtrace;
use std::panic::Location;

use serde::Serialize;

/// Maximum number of frames kept in a snapshot.
pub const MAX_STACK_DEPTH: usize = 10;

const UNKNOWN: &str = "<unknown>";

/// A single frame of a captured call stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackFrame {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl StackFrame {
    fn from_location(location: &Location<'_>, function: impl Into<String>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            function: function.into(),
        }
    }

    fn is_resolved(&self) -> bool {
        self.function != UNKNOWN && self.line != 0
    }
}

/// Captures the stack above `caller`, innermost frame first.
///
/// The first frame is always the `#[track_caller]` location. Frames from the
/// backtrace machinery and from this logger are skipped, and so are frames
/// without a symbol or a line number, which is all a stripped binary
/// renders. A snapshot therefore always names the call site.
pub fn capture(caller: &'static Location<'static>) -> Vec<StackFrame> {
    snapshot(&Backtrace::force_capture().to_string(), caller)
}

fn snapshot(rendered: &str, caller: &Location<'_>) -> Vec<StackFrame> {
    let mut symbolized = parse_backtrace(rendered)
        .into_iter()
        .filter(StackFrame::is_resolved)
        .skip_while(|frame| is_internal(&frame.function))
        .peekable();

    // The innermost resolved frame is usually the call site itself.
    let head = match symbolized.next_if(|frame| frame.line == caller.line()) {
        Some(frame) => StackFrame::from_location(caller, frame.function),
        None => StackFrame::from_location(caller, UNKNOWN),
    };

    std::iter::once(head)
        .chain(symbolized)
        .take(MAX_STACK_DEPTH)
        .collect()
}

fn is_internal(function: &str) -> bool {
    function.contains("backtrace")
        || function.starts_with("vigil_core::logger")
        || function.starts_with("<vigil_core::logger")
        || function.starts_with("core::ops::function")
}

/// Parses the `Display` rendering of a std backtrace.
///
/// Frame headers look like `  3: crate::module::function` and may be
/// followed by an `at path/to/file.rs:12:5` line.
fn parse_backtrace(rendered: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();

    for line in rendered.lines() {
        let trimmed = line.trim();

        if let Some(location) = trimmed.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.line == 0 {
                    let (file, line) = split_location(location);
                    frame.file = file;
                    frame.line = line;
                }
            }
            continue;
        }

        if let Some((index, function)) = trimmed.split_once(": ") {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(StackFrame {
                    file: UNKNOWN.to_string(),
                    line: 0,
                    function: strip_hash(function.trim()).to_string(),
                });
            }
        }
    }

    frames
}

/// Splits `path/file.rs:12:5` into the path and line number.
fn split_location(location: &str) -> (String, u32) {
    let mut parts = location.rsplitn(3, ':');
    let _column = parts.next();
    let line = parts.next().and_then(|l| l.parse().ok());
    match (line, parts.next()) {
        (Some(line), Some(file)) => (file.to_string(), line),
        _ => (location.to_string(), 0),
    }
}

/// Drops a trailing `::h0123456789abcdef` symbol hash.
fn strip_hash(function: &str) -> &str {
    match function.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.chars().all(|c| c.is_ascii_hexdigit()) => {
            head
        }
        _ => function,
    }
}
