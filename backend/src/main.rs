use std::sync::Arc;

use anyhow::Context;
use movie_catalog::{
    api::{AppState, create_router},
    catalog::CatalogService,
    config::AppConfig,
    db::Stores,
    logger::init_tracing,
};
use tokio::net::TcpListener;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_tracing(is_production);

    tracing::info!("Starting movie catalog...");

    let cfg = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(page_size = cfg.page_size.get(), "configuration loaded");

    let stores = Stores::open(&cfg).await.context("failed to open stores")?;
    let catalog = Arc::new(CatalogService::over_stores(&stores, cfg.page_size));
    let app = create_router(AppState::new(catalog));

    let listener = TcpListener::bind(cfg.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr()))?;
    tracing::info!(addr = %listener.local_addr()?, "Server running");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Release both stores even when the server exits with an error.
    stores.close().await;
    served.context("server error")?;

    Ok(())
}
