//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Failures are surfaced to callers as a plain-text message plus an HTTP
/// status; no structured error codes are exposed.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is missing, null, or malformed. No Ledger
    /// Engine call has been made when this is returned.
    #[error("{0}")]
    Validation(String),

    /// A referenced account does not exist or lacks the classification
    /// metadata the operation requires.
    #[error("{0}")]
    Reference(String),

    /// The Ledger Engine call failed or returned a non-success status.
    #[error("ledger engine error: {0}")]
    Engine(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Reference(_) => 400,
            Self::Engine(_) | Self::Internal(_) => 500,
        }
    }
}
