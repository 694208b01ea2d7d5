//! Request/response logging middleware.
//!
//! Every exchange produces an `http_request_started` record, an optional
//! `debug` level `http_request_body` record and exactly one
//! `http_request_completed` record whose severity follows the status class.
//! The health path only logs when it fails.

use std::{
    sync::Arc,
    task::{Context, Poll},
    time::Instant,
};

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode, header},
};
use bytes::Bytes;
use http_body::Body as HttpBody;
use serde_json::Value;
use tower::{Layer, Service};
use vigil_core::{Logger, RequestContext, Sanitizer, attr};

use super::capture::{Completion, TeeBody};
use super::context::to_context;
use super::query::{sanitize_form, sanitize_query};
use super::request_id::{REQUEST_ID_HEADER, RequestIds, TRACE_CONTEXT_HEADER, remote_addr};

const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Tunables of the logging middleware.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Header carrying the request id, read and echoed.
    pub request_id_header: HeaderName,
    /// Header carrying the upstream trace context.
    pub trace_header: HeaderName,
    /// Path that only gets failure logging.
    pub health_path: String,
    /// Largest request body buffered for logging.
    pub max_request_body_bytes: usize,
    /// Largest response prefix kept for `error_response`.
    pub max_response_capture_bytes: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            request_id_header: REQUEST_ID_HEADER.clone(),
            trace_header: TRACE_CONTEXT_HEADER.clone(),
            health_path: "/api/v1/health".to_string(),
            max_request_body_bytes: 1024 * 1024,
            max_response_capture_bytes: 64 * 1024,
        }
    }
}

/// Kind of request body the middleware knows how to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
}

/// Returns the body kind if the request body should be captured for
/// logging: the content type is JSON or a URL-encoded form.
pub fn should_log_body(headers: &HeaderMap) -> Option<BodyKind> {
    let content_type = header_str(headers, header::CONTENT_TYPE);
    if content_type.contains(JSON_CONTENT_TYPE) {
        Some(BodyKind::Json)
    } else if content_type.contains(FORM_CONTENT_TYPE) {
        Some(BodyKind::Form)
    } else {
        None
    }
}

/// Layer that logs requests and responses.
#[derive(Clone, Default)]
pub struct LoggingLayer {
    logger: Logger,
    sanitizer: Sanitizer,
    config: Arc<LoggingConfig>,
}

impl LoggingLayer {
    pub fn new(logger: Logger, sanitizer: Sanitizer, config: LoggingConfig) -> Self {
        Self {
            logger,
            sanitizer,
            config: Arc::new(config),
        }
    }

    /// Returns the middleware tunables.
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddleware {
            inner,
            logger: self.logger.clone(),
            sanitizer: self.sanitizer.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

/// Middleware that logs request/response details.
#[derive(Clone)]
pub struct LoggingMiddleware<S> {
    inner: S,
    logger: Logger,
    sanitizer: Sanitizer,
    config: Arc<LoggingConfig>,
}

impl<S> Service<Request<Body>> for LoggingMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let inner = self.inner.clone();
        let logger = self.logger.clone();

        if request.uri().path() == self.config.health_path {
            return Box::pin(health_exchange(inner, request, logger));
        }

        Box::pin(logged_exchange(
            inner,
            request,
            logger,
            self.sanitizer.clone(),
            Arc::clone(&self.config),
        ))
    }
}

async fn logged_exchange<S>(
    mut inner: S,
    mut request: Request<Body>,
    logger: Logger,
    sanitizer: Sanitizer,
    config: Arc<LoggingConfig>,
) -> Result<Response<Body>, S::Error>
where
    S: Service<Request<Body>, Response = Response<Body>>,
{
    let start = Instant::now();

    let ids = RequestIds::resolve(request.headers(), &config.request_id_header, &config.trace_header);
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let client = remote_addr(&request);

    let body = match should_log_body(request.headers()) {
        Some(kind) => {
            capture_request_body(&mut request, kind, &sanitizer, config.max_request_body_bytes).await
        }
        None => None,
    };

    let request_logger = logger.with_request(&ids.request_id, &ids.trace_id, &method, &path, &client);
    to_context(
        request.extensions_mut(),
        RequestContext::new(ids.request_id.clone(), ids.trace_id.clone(), request_logger.clone()),
    );

    let headers = request.headers();
    request_logger.info(
        "http_request_started",
        [
            attr("user_agent", header_str(headers, header::USER_AGENT)),
            attr("referer", header_str(headers, header::REFERER)),
            attr("content_length", content_length(headers)),
            attr("query_params", sanitize_query(request.uri().query(), &sanitizer)),
        ],
    );

    if let Some(body) = body {
        request_logger.debug("http_request_body", [attr("body", body)]);
    }

    let capture_limit = config.max_response_capture_bytes;
    match inner.call(request).await {
        Ok(response) => {
            let (mut parts, body) = response.into_parts();
            if let Ok(value) = HeaderValue::from_str(&ids.request_id) {
                parts.headers.insert(config.request_id_header.clone(), value);
            }

            let completion = Completion::new(request_logger, sanitizer, start, parts.status, capture_limit);
            let body = Body::new(TeeBody::new(body, completion));
            Ok(Response::from_parts(parts, body))
        }
        Err(e) => {
            Completion::new(
                request_logger,
                sanitizer,
                start,
                StatusCode::INTERNAL_SERVER_ERROR,
                capture_limit,
            )
            .finish();
            Err(e)
        }
    }
}

async fn health_exchange<S>(
    mut inner: S,
    request: Request<Body>,
    logger: Logger,
) -> Result<Response<Body>, S::Error>
where
    S: Service<Request<Body>, Response = Response<Body>>,
{
    let client = remote_addr(&request);
    let response = inner.call(request).await?;

    let status = response.status();
    if status.is_server_error() {
        logger.error(
            "health_check_failed",
            [attr("status", status.as_u16()), attr("remote_addr", client)],
        );
    }

    Ok(response)
}

/// Buffers the request body and puts an identical body back.
///
/// Only bodies with a known length within `limit` are read; streamed bodies
/// are left untouched. Returns the sanitized document to log, if any.
async fn capture_request_body(
    request: &mut Request<Body>,
    kind: BodyKind,
    sanitizer: &Sanitizer,
    limit: usize,
) -> Option<Value> {
    let known_len = request.body().size_hint().exact()?;
    if known_len > limit as u64 {
        return None;
    }

    let body = std::mem::take(request.body_mut());
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            // The original stream is consumed; surface the read failure to
            // the handler instead of an empty body.
            let failed = futures_util::stream::once(async move { Err::<Bytes, _>(e) });
            *request.body_mut() = Body::from_stream(failed);
            return None;
        }
    };

    *request.body_mut() = Body::from(bytes.clone());
    if bytes.is_empty() {
        return None;
    }

    match kind {
        BodyKind::Form => Some(sanitize_form(&bytes, sanitizer)),
        BodyKind::Json => Some(sanitizer.redact_json_bytes(&bytes)),
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> &str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}
