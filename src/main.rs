mod api;
mod app_state;
mod core;
mod domain;
mod errors;
mod routes;

use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::core::config::gateway_config::GatewayConfig;
use crate::core::persistence::logs::log_repository::LOG_FILE_PREFIX;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env();

    // Stdout plus a daily-rolling file; the file is what the
    // /api/v1/system/logs endpoints read back.
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    if !config.has_api_key() {
        warn!("GEMINI_API_KEY is not set; chat requests will fail as not_configured");
    }
    info!(model = %config.model, addr = %config.bind_addr, "starting Genibi chat gateway");

    let bind_addr = config.bind_addr.clone();
    let state = app_state::build_app_state(config);
    let app = routes::app_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to install shutdown signal handler: {e}");
        return;
    }
    info!("shutdown signal received, draining connections");
}
