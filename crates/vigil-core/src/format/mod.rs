use crate::logger::LogRecord;
use crate::types::LogFormat;

pub mod structured;
pub mod text;

pub use structured::{StructuredFormatter, cloud_severity};
pub use text::TextFormatter;

impl LogFormat {
    /// Returns the formatter for this format.
    pub fn formatter(&self) -> &'static dyn RecordFormatter {
        match self {
            LogFormat::Structured => &StructuredFormatter,
            LogFormat::Text => &TextFormatter,
        }
    }
}

/// A trait for serializing a record into a single output line.
pub trait RecordFormatter: Send + Sync {
    /// Serializes the record. The result never contains a newline.
    fn format(&self, record: &LogRecord) -> String;
}
