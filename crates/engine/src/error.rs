//! Ledger Engine client errors.

use thiserror::Error;

/// Errors from Ledger Engine calls.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The HTTP request itself failed (connect, timeout, decode).
    #[error("engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("engine returned status {status}: {message}")]
    Status {
        /// HTTP status code returned by the engine.
        status: u16,
        /// Error message extracted from the engine response body.
        message: String,
    },

    /// The engine answered 2xx but the body was not what the contract
    /// promises.
    #[error("unexpected engine response: {0}")]
    UnexpectedResponse(String),
}
