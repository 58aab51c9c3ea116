//! Merchant onboarding and payout routes.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use tracing::info;

use giftledger_core::ledger::{AccountClass, AccountKind, TransactionPlan};

use crate::error::ApiError;
use crate::routes::TransactionResponse;
use crate::AppState;

/// Creates the merchant routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/merchant/create", post(create_merchant))
        .route("/merchant/payout", post(payout_merchant))
}

/// Request body for creating a merchant.
#[derive(Debug, Deserialize)]
pub struct CreateMerchantRequest {
    /// Merchant display name.
    pub merchant_name: Option<String>,
}

/// Request body for paying out a merchant.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PayoutMerchantRequest {
    /// Merchant account address.
    pub merchant_id: Option<String>,
    /// The amount to payout, as a string-encoded integer.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub amount: Option<i64>,
}

/// POST `/merchant/create` - onboard a merchant.
///
/// Creates the merchant account with a zero-amount posting, then attaches
/// its classification metadata in a second step.
async fn create_merchant(
    State(state): State<AppState>,
    payload: Result<Json<CreateMerchantRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(req) = payload
        .map_err(|err| ApiError::validation(format!("unable to decode CreateMerchant request: {err}")))?;
    let Some(merchant_name) = req.merchant_name else {
        return Err(ApiError::validation("merchantName cannot be null"));
    };

    let merchant_id = AccountKind::Merchant.new_address();
    let plan = TransactionPlan::create_merchant(&merchant_id);
    state.engine.create_transaction(plan.metadata, plan.postings).await?;

    // Classify the account the transaction just created. A failure here
    // leaves an existing but unclassified account; it is surfaced, not
    // rolled back.
    let class = AccountClass::Merchant {
        name: merchant_name.clone(),
    };
    state
        .engine
        .add_account_metadata(&merchant_id, class.to_metadata())
        .await?;

    info!(merchant_id = %merchant_id, name = %merchant_name, "created merchant");
    Ok(StatusCode::OK)
}

/// POST `/merchant/payout` - pay out a merchant balance.
async fn payout_merchant(
    State(state): State<AppState>,
    payload: Result<Json<PayoutMerchantRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(req) = payload
        .map_err(|err| ApiError::validation(format!("unable to decode request: {err}")))?;
    let (Some(merchant_id), Some(amount)) = (req.merchant_id, req.amount) else {
        return Err(ApiError::validation("merchantId and amount cannot be null"));
    };

    state
        .engine
        .get_account(&merchant_id)
        .await?
        .ok_or_else(|| {
            ApiError::reference(format!("no ledger account associated with address {merchant_id}"))
        })?;

    let plan = TransactionPlan::payout_merchant(&merchant_id, amount)?;
    let transaction = state.engine.create_transaction(plan.metadata, plan.postings).await?;
    Ok(Json(TransactionResponse { transaction }))
}
