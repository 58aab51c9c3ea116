//! Ledger Engine client.
//!
//! The Ledger Engine is the external durable double-entry store: it commits
//! multi-posting transactions atomically, stores arbitrary metadata per
//! account, and answers point and bulk balance queries. This crate defines
//! the [`LedgerEngine`] trait every component is injected with, plus the
//! HTTP implementation speaking the engine's JSON API.

pub mod error;
pub mod http;
pub mod wire;

use std::collections::HashMap;

use async_trait::async_trait;

use giftledger_core::ledger::{Account, Metadata, Posting};

pub use error::EngineError;
pub use http::HttpLedgerEngine;
pub use wire::Transaction;

/// Contract required from the Ledger Engine.
///
/// All calls are awaited with no retry policy; a single failed call aborts
/// the in-flight request.
#[async_trait]
pub trait LedgerEngine: Send + Sync {
    /// Atomically commits a set of postings with the given metadata.
    ///
    /// The commit timestamp is stamped here, not by the caller. Accounts
    /// named as a posting source or destination are created implicitly.
    async fn create_transaction(
        &self,
        metadata: Metadata,
        postings: Vec<Posting>,
    ) -> Result<Transaction, EngineError>;

    /// Attaches metadata to an account. Idempotent and additive.
    async fn add_account_metadata(
        &self,
        address: &str,
        metadata: Metadata,
    ) -> Result<(), EngineError>;

    /// Looks up a single account by address.
    ///
    /// Returns `None` for an unknown address; a known account with no
    /// metadata attached yet is `Some` with an empty metadata map.
    async fn get_account(&self, address: &str) -> Result<Option<Account>, EngineError>;

    /// Lists every account on the ledger, following cursors to exhaustion.
    async fn list_accounts(&self) -> Result<Vec<Account>, EngineError>;

    /// Lists every transaction on the ledger, following cursors to
    /// exhaustion.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, EngineError>;

    /// Lists the balance of every account for the ledger asset, following
    /// cursors to exhaustion.
    async fn list_balances(&self) -> Result<HashMap<String, i64>, EngineError>;
}
