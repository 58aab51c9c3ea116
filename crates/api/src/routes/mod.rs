//! API route definitions.

use axum::Router;
use serde::Serialize;

use giftledger_engine::Transaction;

use crate::AppState;

pub mod cards;
pub mod health;
pub mod ledger;
pub mod merchants;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(merchants::routes())
        .merge(cards::routes())
        .merge(ledger::routes())
}

/// Response wrapping a committed transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// The transaction as committed by the Ledger Engine.
    pub transaction: Transaction,
}
