//! Wire format of the Ledger Engine HTTP API.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use giftledger_core::ledger::{Account, Metadata, Posting};

/// Asset all postings are denominated in (minor units).
pub const ASSET: &str = "USD";

/// A committed transaction as reported by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Engine-assigned transaction identifier.
    #[serde(default)]
    pub txid: i64,
    /// Commit timestamp.
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// Committed postings.
    pub postings: Vec<WirePosting>,
}

/// A posting on the wire: a [`Posting`] plus the ledger asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePosting {
    /// Transfer amount in minor units.
    pub amount: i64,
    /// Asset the amount is denominated in.
    pub asset: String,
    /// Source account address.
    pub source: String,
    /// Destination account address.
    pub destination: String,
}

impl From<Posting> for WirePosting {
    fn from(posting: Posting) -> Self {
        Self {
            amount: posting.amount,
            asset: ASSET.to_string(),
            source: posting.source,
            destination: posting.destination,
        }
    }
}

/// Request body for committing a transaction.
#[derive(Debug, Serialize)]
pub struct PostTransaction {
    /// Transaction metadata.
    pub metadata: Metadata,
    /// Postings to commit atomically.
    pub postings: Vec<WirePosting>,
    /// Commit timestamp, stamped by the client.
    pub timestamp: DateTime<Utc>,
}

/// Single-object response envelope.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    /// The wrapped payload.
    pub data: T,
}

/// Cursor-paginated response envelope.
#[derive(Debug, Deserialize)]
pub struct CursorEnvelope<T> {
    /// The wrapped page.
    pub cursor: CursorPage<T>,
}

/// One page of a cursored listing.
#[derive(Debug, Deserialize)]
pub struct CursorPage<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// Whether another page follows.
    #[serde(default)]
    pub has_more: bool,
    /// Token for the next page, when `has_more` is set.
    #[serde(default)]
    pub next: Option<String>,
}

/// An account as it appears in engine responses.
///
/// A point lookup on an unknown address can answer 200 with an empty
/// account object, so `address` is defaulted and checked by
/// [`Self::into_account`].
#[derive(Debug, Deserialize)]
pub struct AccountData {
    /// Account address; empty when the engine reports "no such account".
    #[serde(default)]
    pub address: String,
    /// Attached metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl AccountData {
    /// Converts into a domain [`Account`], or `None` when the engine
    /// reported an account that does not exist.
    #[must_use]
    pub fn into_account(self) -> Option<Account> {
        if self.address.is_empty() {
            return None;
        }
        Some(Account {
            address: self.address,
            metadata: self.metadata,
        })
    }
}

/// One balances page item: account address to per-asset balances.
pub type BalancesByAccount = HashMap<String, HashMap<String, i64>>;

/// Error body the engine attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable engine error message.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Extracts the engine's error message from a raw response body, falling
/// back to the body itself.
#[must_use]
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|response| response.error_message)
        .unwrap_or_else(|| body.to_string())
}
