//! Giftledger API Server
//!
//! Main entry point for the gift-card ledger service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use giftledger_api::{AppState, bootstrap, create_router};
use giftledger_engine::HttpLedgerEngine;
use giftledger_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "giftledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Build the Ledger Engine client
    let engine = HttpLedgerEngine::connect(&config.engine)?;
    info!(url = %config.engine.url, ledger = %config.engine.ledger, "Ledger Engine client configured");

    // Ensure the internal accounts exist and are classified before serving.
    // Any failure here is fatal to startup.
    bootstrap::ensure_internal_accounts(&engine)
        .await
        .context("failed to initialize internal accounts")?;

    // Create application state
    let state = AppState {
        engine: Arc::new(engine),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
