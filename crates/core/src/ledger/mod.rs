//! Gift-card ledger domain logic.
//!
//! Every financial event is expressed as a set of two-party postings
//! against the `world` source/sink account; the books balance as a global
//! property, checked by [`summary::summarize`], not per transaction.

pub mod account;
pub mod summary;
pub mod transaction;

#[cfg(test)]
mod transaction_props;

pub use account::{Account, AccountClass, AccountKind, BalanceType, InternalAccount, LedgerableType, Metadata};
pub use summary::LedgerSummary;
pub use transaction::{Posting, TransactionError, TransactionPlan, TransactionType};
