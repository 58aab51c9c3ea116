//! Error responses for the HTTP surface.
//!
//! Every failure is a plain-text message plus an HTTP status; no structured
//! error codes are exposed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use giftledger_core::ledger::TransactionError;
use giftledger_engine::EngineError;
use giftledger_shared::AppError;

/// Request-boundary error wrapper carrying the HTTP mapping.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// A missing/null/malformed request field. No engine call was made.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// A referenced account is missing or unclassified.
    #[must_use]
    pub fn reference(message: impl Into<String>) -> Self {
        Self(AppError::Reference(message.into()))
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(AppError::Engine(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        (status, self.0.to_string()).into_response()
    }
}
