//! Vigil server binary.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vigil_core::{Logger, attr};
use vigil_server::{AppState, LoggingLayer, Settings, create_router_with_state, run_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Service diagnostics; request records go through the vigil logger
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let addr = settings.addr()?;

    let logger = Logger::from_config(settings.logger_config());
    let logging = LoggingLayer::new(logger.clone(), settings.sanitizer(), settings.logging_config()?);

    tracing::info!("Starting Vigil server v{}", vigil_server::version());
    logger.info(
        "server_starting",
        [
            attr("addr", addr.to_string()),
            attr("environment", &settings.environment),
            attr("log_level", logger.level()),
        ],
    );

    let app = create_router_with_state(AppState::default(), logging);
    run_server(addr, app).await?;

    logger.info("server_stopped", []);
    Ok(())
}
