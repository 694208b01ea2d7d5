//! Middleware stack for the HTTP server.
//!
//! - `LoggingLayer`: resolves correlation ids, captures and sanitizes
//!   bodies, and emits the started/body/completed records
//! - `RequestScope`: extractor handing the request-bound logger to handlers

mod capture;
mod context;
mod logging;
mod query;
mod request_id;

pub use capture::{TeeBody, severity_for_status};
pub use context::{RequestScope, from_context, to_context};
pub use logging::{BodyKind, LoggingConfig, LoggingLayer, LoggingMiddleware, should_log_body};
pub use query::{decode_pairs, sanitize_form, sanitize_query};
pub use request_id::{REQUEST_ID_HEADER, RequestIds, TRACE_CONTEXT_HEADER, remote_addr};
