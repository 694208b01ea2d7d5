use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid input, with the offending field
    #[error("{message}")]
    BadRequest { message: String, field: String },

    /// Unknown resource
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Resource already exists
    #[error("{0}")]
    Conflict(String),

    /// Internal error; the message is logged but never sent to the client
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            field: field.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Attaches the request metadata that goes into the error body.
    pub fn at(self, trace_id: &str, path: &str) -> ApiError {
        ApiError {
            error: self,
            trace_id: trace_id.to_string(),
            path: path.to_string(),
        }
    }
}

/// An [`AppError`] bound to the request it answers.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    trace_id: String,
    path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: DateTime<Utc>,
    pub trace_id: String,
    pub path: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let code = self.error.code().to_string();

        let (message, details) = match self.error {
            AppError::BadRequest { message, field } => (message, Some(json!({ "field": field }))),
            AppError::Internal(_) => ("An internal error occurred".to_string(), None),
            other => (other.to_string(), None),
        };

        let body = Json(ErrorResponse {
            code,
            message,
            details,
            timestamp: Utc::now(),
            trace_id: self.trace_id,
            path: self.path,
        });

        (status, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.at("", "").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_carries_field_details() {
        let response = AppError::bad_request("Email is required", "email")
            .at("trace-1", "/api/v1/users")
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Email is required");
        assert_eq!(body["details"]["field"], "email");
        assert_eq!(body["traceId"], "trace-1");
        assert_eq!(body["path"], "/api/v1/users");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn internal_error_hides_message() {
        let response = AppError::Internal("db password rejected".into()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body["message"], "An internal error occurred");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn not_found_message_names_resource() {
        let err = AppError::not_found("user", "42");
        assert_eq!(err.to_string(), "user not found: 42");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("dup".into()).code(), "CONFLICT");
    }
}
