//! Redaction of sensitive data before it reaches a log record.
//!
//! - `fields`: the immutable [`SensitiveFieldSet`]
//! - `redact`: [`Sanitizer`] with key-based and recursive redaction
//! - `email`: [`mask_email`] for logging known address fields

mod email;
mod fields;
mod redact;

pub use email::{MASK_CHAR, mask_email};
pub use fields::{DEFAULT_SENSITIVE_FIELDS, SensitiveFieldSet};
pub use redact::{REDACTED_MARKER, Sanitizer, TOKEN_REDACTED_MARKER};
