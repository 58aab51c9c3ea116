//! Ledger-wide read routes: accounts, transactions, and the consistency
//! summary.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use giftledger_core::ledger::account::{
    BALANCE_TYPE_KEY, LEDGERABLE_TYPE_KEY, MERCHANT_ID_KEY, NAME_KEY, metadata_str,
};
use giftledger_core::ledger::{LedgerSummary, summary};
use giftledger_engine::Transaction;

use crate::error::ApiError;
use crate::AppState;

/// Creates the ledger read routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/transactions", get(list_transactions))
        .route("/ledger", get(ledger_summary))
}

/// An account joined with its balance for the listing response.
///
/// Metadata fields an account does not carry are empty strings, matching
/// the wire contract.
#[derive(Debug, Serialize)]
pub struct AccountView {
    /// Account address.
    pub address: String,
    /// Human-readable label, when classified.
    pub name: String,
    /// Owning merchant back-reference, when present.
    pub merchant_id: String,
    /// Balance in minor units of the ledger asset.
    pub balance: i64,
    /// Credit/debit classification tag, when classified.
    pub balance_type: String,
    /// Internal/external classification tag, when classified.
    pub ledgerable_type: String,
}

/// Response for the account listing.
#[derive(Debug, Serialize)]
pub struct ListAccountsResponse {
    /// All accounts with balances.
    pub accounts: Vec<AccountView>,
}

/// Response for the transaction listing.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    /// All committed transactions.
    pub transactions: Vec<Transaction>,
}

/// GET `/accounts` - list every account with its balance and
/// classification.
async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    let accounts = state.engine.list_accounts().await?;
    let balances = state.engine.list_balances().await?;

    let accounts = accounts
        .into_iter()
        .map(|account| {
            let field = |key| metadata_str(&account.metadata, key).unwrap_or_default().to_string();
            let name = field(NAME_KEY);
            let merchant_id = field(MERCHANT_ID_KEY);
            let balance_type = field(BALANCE_TYPE_KEY);
            let ledgerable_type = field(LEDGERABLE_TYPE_KEY);
            AccountView {
                balance: balances.get(&account.address).copied().unwrap_or(0),
                address: account.address,
                name,
                merchant_id,
                balance_type,
                ledgerable_type,
            }
        })
        .collect();
    Ok(Json(ListAccountsResponse { accounts }))
}

/// GET `/transactions` - list every committed transaction.
async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<ListTransactionsResponse>, ApiError> {
    let transactions = state.engine.list_transactions().await?;
    Ok(Json(ListTransactionsResponse { transactions }))
}

/// GET `/ledger` - recompute the balance-sheet sanity view.
///
/// Serves as a sanity check that debits = credits. The two bulk reads are
/// not snapshot-isolated; a commit between them can skew a single reading.
async fn ledger_summary(State(state): State<AppState>) -> Result<Json<LedgerSummary>, ApiError> {
    let accounts = state.engine.list_accounts().await?;
    let balances = state.engine.list_balances().await?;
    Ok(Json(summary::summarize(&accounts, &balances)))
}
