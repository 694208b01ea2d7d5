//! Per-request scope carrying correlation identifiers and the bound logger.

use crate::logger::Logger;

/// Identity and logger of one in-flight request.
///
/// Built once when a request enters the logging middleware and read-only
/// afterwards. Collaborators receive it explicitly (or through the HTTP
/// layer's extension map) instead of looking it up from ambient state.
///
/// # Example
///
/// ```
/// use vigil_core::{Logger, RequestContext};
///
/// let ctx = RequestContext::new("req-1", "trace-1", Logger::default());
/// assert_eq!(ctx.request_id(), "req-1");
///
/// // Without a context the default logger is used.
/// let logger = RequestContext::logger_or_default(None);
/// assert_eq!(logger.level(), vigil_core::Level::Info);
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    trace_id: String,
    logger: Logger,
}

impl RequestContext {
    /// Creates a new context.
    pub fn new(request_id: impl Into<String>, trace_id: impl Into<String>, logger: Logger) -> Self {
        Self {
            request_id: request_id.into(),
            trace_id: trace_id.into(),
            logger,
        }
    }

    /// Returns the request identifier.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the trace identifier.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Returns the request-scoped logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Returns the bound logger, or the process default when there is no
    /// context.
    pub fn logger_or_default(context: Option<&RequestContext>) -> Logger {
        match context {
            Some(ctx) => ctx.logger.clone(),
            None => Logger::global_default().clone(),
        }
    }
}
