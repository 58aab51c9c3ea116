//! Shared configuration and error types for Giftledger.
//!
//! This crate provides the pieces every other crate needs:
//! - Application-wide error type with HTTP status mapping
//! - Configuration management

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
