use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: DateTime<Utc>,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "UP".to_string(),
            time: Utc::now(),
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}
