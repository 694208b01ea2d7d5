//! Vigil Server - HTTP surface for Vigil
//!
//! Axum router, request/response logging middleware, settings and the stub
//! user endpoints that log through the request-scoped logger.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;
pub mod users;

pub use error::{ApiError, AppError, ErrorResponse};
pub use handlers::health::HealthResponse;
pub use middleware::{LoggingConfig, LoggingLayer, RequestScope};
pub use server::{create_router, create_router_with_state, run_server, with_observability};
pub use settings::{Settings, SettingsError};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
