//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for the gift-card ledger
//! - Request/response types
//! - The idempotent startup bootstrap for the internal accounts

pub mod bootstrap;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use giftledger_engine::LedgerEngine;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Injected Ledger Engine client.
    pub engine: Arc<dyn LedgerEngine>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
