//! Test client helpers.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use vigil_core::{Level, LogFormat, Logger, LoggerConfig, MemorySink, Sanitizer};
use vigil_server::{AppState, LoggingConfig, LoggingLayer, create_router_with_state};

/// In-process client for HTTP integration tests.
pub struct TestClient {
    app: Router,
}

impl TestClient {
    /// Creates a test client over the given router.
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    /// Sends a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.get_with_headers(uri, vec![]).await
    }

    /// Sends a GET request with custom headers.
    pub async fn get_with_headers(&self, uri: &str, headers: Vec<(&str, &str)>) -> TestResponse {
        let mut builder = Request::builder().uri(uri).method("GET");

        for (name, value) in headers {
            builder = builder.header(name, value);
        }

        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, body: &str) -> TestResponse {
        self.post(uri, "application/json", body).await
    }

    /// Sends a POST request with an arbitrary content type.
    pub async fn post(&self, uri: &str, content_type: &str, body: &str) -> TestResponse {
        self.request(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, body.len())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Sends an arbitrary request.
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        TestResponse::from_response(response).await
    }
}

/// Collected response with assertion helpers.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the body as a string.
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("Body is not valid UTF-8")
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON")
    }

    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Asserts the status code.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Asserts that a header exists.
    pub fn assert_header_exists(&self, name: &str) -> &Self {
        assert!(
            self.headers.contains_key(name),
            "Expected header '{}' to exist",
            name
        );
        self
    }

    /// Asserts a header value.
    pub fn assert_header(&self, name: &str, expected: &str) -> &Self {
        let value = self
            .header(name)
            .unwrap_or_else(|| panic!("Header '{}' not found", name));

        assert_eq!(
            value, expected,
            "Expected header '{}' to be '{}' but got '{}'",
            name, expected, value
        );
        self
    }
}

/// Creates a TestClient with the default router.
pub fn client() -> TestClient {
    TestClient::new(vigil_server::create_router())
}

/// Builds a `LoggingLayer` writing debug-level structured records into
/// memory.
pub fn memory_layer() -> (LoggingLayer, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::with_sink(LoggerConfig::new(Level::Debug, LogFormat::Structured), sink.clone());
    let layer = LoggingLayer::new(logger, Sanitizer::default(), LoggingConfig::default());
    (layer, sink)
}

/// Application router whose records land in the returned sink.
pub fn logged_router() -> (Router, Arc<MemorySink>) {
    let (layer, sink) = memory_layer();
    (create_router_with_state(AppState::default(), layer), sink)
}

/// Creates a TestClient over [`logged_router`].
pub fn logged_client() -> (TestClient, Arc<MemorySink>) {
    let (router, sink) = logged_router();
    (TestClient::new(router), sink)
}

/// Returns the records with the given message, panicking unless there is
/// exactly one.
pub fn only(sink: &MemorySink, message: &str) -> Value {
    let mut records = sink.records_with_message(message);
    assert_eq!(records.len(), 1, "expected one '{}' record: {:?}", message, sink.lines());
    records.remove(0)
}
