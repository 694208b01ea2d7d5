use std::net::SocketAddr;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handlers::{
    health::health_check,
    users::{create_user, get_user, not_found},
};
use crate::middleware::LoggingLayer;
use crate::state::AppState;

/// Creates the application router behind the logging middleware.
///
/// The health route is mounted at the middleware's health path so both
/// always agree.
pub fn create_router_with_state(state: AppState, logging: LoggingLayer) -> Router {
    let app_router = Router::new()
        .route(&logging.config().health_path, get(health_check))
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users/{id}", get(get_user))
        .fallback(not_found)
        .with_state(state);

    with_observability(app_router, logging)
}

/// Creates a router with empty state and default logging (stdout).
pub fn create_router() -> Router {
    create_router_with_state(AppState::default(), LoggingLayer::default())
}

/// Wraps a router in panic recovery and, outside of it, the logging layer,
/// so a panicking handler is logged as a 500.
pub fn with_observability(router: Router, logging: LoggingLayer) -> Router {
    router.layer(CatchPanicLayer::new()).layer(logging)
}

/// Serves the router until Ctrl-C or SIGTERM.
pub async fn run_server(addr: SocketAddr, app: Router) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
