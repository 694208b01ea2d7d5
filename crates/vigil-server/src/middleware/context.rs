//! Binding of the request-scoped logger to the HTTP request.

use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{Extensions, request::Parts},
};
use vigil_core::{Logger, RequestContext};

use crate::error::{ApiError, AppError};

/// Attaches a request context to the request's extension map.
pub fn to_context(extensions: &mut Extensions, context: RequestContext) {
    extensions.insert(context);
}

/// Returns the logger bound to the request, or the process default.
pub fn from_context(extensions: &Extensions) -> Logger {
    RequestContext::logger_or_default(extensions.get::<RequestContext>())
}

/// Extractor giving handlers the request logger and what they need to
/// build error bodies.
///
/// Never rejects: outside the logging middleware it carries the default
/// logger and empty ids.
#[derive(Debug, Clone)]
pub struct RequestScope {
    logger: Logger,
    trace_id: String,
    path: String,
}

impl RequestScope {
    /// Returns the request-bound logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Returns the trace id of the request.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Returns the path the client requested.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Attaches the request metadata to an error.
    pub fn fail(&self, error: AppError) -> ApiError {
        error.at(&self.trace_id, &self.path)
    }
}

impl<S> FromRequestParts<S> for RequestScope
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts.extensions.get::<RequestContext>();
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|OriginalUri(uri)| uri.path())
            .unwrap_or_else(|| parts.uri.path())
            .to_string();

        Ok(RequestScope {
            logger: from_context(&parts.extensions),
            trace_id: context.map(|c| c.trace_id().to_string()).unwrap_or_default(),
            path,
        })
    }
}
