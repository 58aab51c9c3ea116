//! Core business logic for Giftledger.
//!
//! This crate carries the domain rules of the gift-card ledger: account
//! addressing and classification, per-event transaction construction, and
//! the consistency aggregation that proves the books balance. It has no
//! web or Ledger Engine dependencies.

pub mod ledger;
