//! Response body tee and the completion record.
//!
//! The body handed to the client is wrapped in [`TeeBody`]. Every frame is
//! passed through untouched; data frames are then counted and copied into a
//! bounded side buffer. The completion record is written once, when the
//! stream ends, fails or is dropped by the transport.

use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use axum::{body::Body, http::StatusCode};
use bytes::{Bytes, BytesMut};
use http_body::{Body as HttpBody, Frame, SizeHint};
use serde_json::Value;
use vigil_core::{Attr, Level, Logger, Sanitizer, attr};

/// Maps a response status to the severity of its completion record.
pub fn severity_for_status(status: u16) -> Level {
    match status {
        500.. => Level::Error,
        400..=499 => Level::Warn,
        _ => Level::Info,
    }
}

/// Pending `http_request_completed` record of one exchange.
pub(crate) struct Completion {
    logger: Logger,
    sanitizer: Sanitizer,
    start: Instant,
    status: StatusCode,
    captured: BytesMut,
    capture_limit: usize,
    truncated: bool,
    bytes_written: u64,
    stream_error: Option<String>,
    done: bool,
}

impl Completion {
    pub(crate) fn new(
        logger: Logger,
        sanitizer: Sanitizer,
        start: Instant,
        status: StatusCode,
        capture_limit: usize,
    ) -> Self {
        Self {
            logger,
            sanitizer,
            start,
            status,
            captured: BytesMut::new(),
            capture_limit,
            truncated: false,
            bytes_written: 0,
            stream_error: None,
            done: false,
        }
    }

    fn record(&mut self, chunk: &[u8]) {
        self.bytes_written += chunk.len() as u64;

        let room = self.capture_limit.saturating_sub(self.captured.len());
        if chunk.len() > room {
            self.truncated = true;
        }
        self.captured.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    fn fail(&mut self, error: String) {
        self.stream_error = Some(error);
        self.finish();
    }

    pub(crate) fn finish(&mut self) {
        if self.done {
            return;
        }
        self.done = true;

        let duration = self.start.elapsed();
        let status = self.status.as_u16();

        let mut attrs: Vec<Attr> = vec![
            attr("status", status),
            attr("bytes_written", self.bytes_written),
            attr("duration_ms", duration.as_millis() as u64),
            attr("duration_human", format!("{:?}", duration)),
        ];

        if status >= 400
            && let Some(body) = self.error_response()
        {
            attrs.push(attr("error_response", body));
        }

        if let Some(error) = self.stream_error.take() {
            attrs.push(attr("stream_error", error));
        }

        self.logger
            .log(severity_for_status(status), "http_request_completed", attrs);
    }

    /// The captured body, if it is a complete JSON object.
    fn error_response(&self) -> Option<Value> {
        if self.captured.is_empty() || self.truncated {
            return None;
        }
        match serde_json::from_slice::<Value>(&self.captured) {
            Ok(body @ Value::Object(_)) => Some(self.sanitizer.redact_deep(body)),
            _ => None,
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Response body that duplicates what it streams into the completion
/// record.
pub struct TeeBody {
    inner: Body,
    completion: Completion,
}

impl TeeBody {
    pub(crate) fn new(inner: Body, completion: Completion) -> Self {
        Self { inner, completion }
    }
}

impl HttpBody for TeeBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);

        match &polled {
            Poll::Ready(Some(Ok(frame))) => {
                if let Some(data) = frame.data_ref() {
                    this.completion.record(data);
                }
            }
            Poll::Ready(Some(Err(e))) => this.completion.fail(e.to_string()),
            Poll::Ready(None) => this.completion.finish(),
            Poll::Pending => {}
        }

        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
