//! HTTP server for the event recommendation engine.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use data_loader::DataIndex;
use model::ModelManager;
use server::{AppState, ServerConfig, routes};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    init_tracing(&config.log_level);

    info!("Starting recommendation server");
    info!(
        "Configuration: port={}, data_dir={}, model_path={}, strategy={}, languages={:?}",
        config.port,
        config.data_dir.display(),
        config.model_path.display(),
        config.strategy,
        config.languages
    );

    let data_index = DataIndex::load_from_files(&config.data_dir)
        .with_context(|| format!("Failed to load records from {}", config.data_dir.display()))?;

    let manager = ModelManager::load(
        Arc::new(data_index),
        config.engine_config(),
        config.model_path.clone(),
    );
    info!("Model state: {}", manager.state());

    let app = routes::build_router(AppState::new(Arc::new(manager)))
        .layer(TraceLayer::new_for_http());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, starting graceful shutdown");
}
