//! Card purchase and spend routes.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use tracing::info;

use giftledger_core::ledger::account::{MERCHANT_ID_KEY, NAME_KEY, metadata_str};
use giftledger_core::ledger::{AccountClass, AccountKind, TransactionPlan};

use crate::error::ApiError;
use crate::routes::TransactionResponse;
use crate::AppState;

/// Creates the card routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/card/purchase", post(purchase_card))
        .route("/card/spend", post(spend_card))
}

/// Request body for funding a new card.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PurchaseCardRequest {
    /// Cardholder name.
    pub user_name: Option<String>,
    /// Address of the merchant the card is purchased from.
    pub merchant_id: Option<String>,
    /// The amount purchased, as a string-encoded integer.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub amount: Option<i64>,
    /// Amount of the purchase that is revenue.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub revenue_take: Option<i64>,
    /// Amount of the purchase that is expensed (ex. cc fees).
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub expenses: Option<i64>,
}

/// Request body for spending a card.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct SpendCardRequest {
    /// Card account address.
    pub card_address: Option<String>,
    /// The amount spent, as a string-encoded integer.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub amount: Option<i64>,
}

/// POST `/card/purchase` - fund a new card.
///
/// The merchant must already exist and be classified; the freshly created
/// card account is classified in a second step after the commit.
async fn purchase_card(
    State(state): State<AppState>,
    payload: Result<Json<PurchaseCardRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(req) = payload
        .map_err(|err| ApiError::validation(format!("unable to decode PurchaseCard request: {err}")))?;
    info!(?req, "got PurchaseCard request");
    let (Some(user_name), Some(merchant_id), Some(amount)) =
        (req.user_name, req.merchant_id, req.amount)
    else {
        return Err(ApiError::validation(
            "none of userName, merchantId, or amount can be null",
        ));
    };

    // The engine has no schema for "merchant": existence plus classification
    // metadata is the only check available.
    state
        .engine
        .get_account(&merchant_id)
        .await?
        .filter(|account| account.balance_type().is_some())
        .ok_or_else(|| {
            ApiError::reference(format!("no ledger account associated with address {merchant_id}"))
        })?;

    let card_id = AccountKind::Card.new_address();
    let plan = TransactionPlan::purchase_card(
        &card_id,
        &user_name,
        &merchant_id,
        amount,
        req.revenue_take,
        req.expenses,
    )?;
    let transaction = state.engine.create_transaction(plan.metadata, plan.postings).await?;

    let class = AccountClass::Card {
        name: user_name,
        merchant: merchant_id,
    };
    state
        .engine
        .add_account_metadata(&card_id, class.to_metadata())
        .await?;

    Ok(Json(TransactionResponse { transaction }))
}

/// POST `/card/spend` - spend a card at its merchant.
async fn spend_card(
    State(state): State<AppState>,
    payload: Result<Json<SpendCardRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let Json(req) = payload
        .map_err(|err| ApiError::validation(format!("unable to decode SpendCard request: {err}")))?;
    info!(?req, "got SpendCard request");
    let (Some(card_address), Some(amount)) = (req.card_address, req.amount) else {
        return Err(ApiError::validation("cardAddress and amount cannot be null"));
    };

    let account = state
        .engine
        .get_account(&card_address)
        .await?
        .ok_or_else(|| {
            ApiError::reference(format!("no ledger account associated with address {card_address}"))
        })?;
    let merchant_id = metadata_str(&account.metadata, MERCHANT_ID_KEY).ok_or_else(|| {
        ApiError::reference(format!(
            "no merchant id associated with account address: {card_address}"
        ))
    })?;
    let user_name = metadata_str(&account.metadata, NAME_KEY).ok_or_else(|| {
        ApiError::reference(format!(
            "no user id associated with account address: {card_address}"
        ))
    })?;

    let purchase_id = AccountKind::Purchase.new_address();
    let plan = TransactionPlan::spend_card(&card_address, merchant_id, user_name, &purchase_id, amount)?;
    let transaction = state.engine.create_transaction(plan.metadata, plan.postings).await?;
    Ok(Json(TransactionResponse { transaction }))
}
