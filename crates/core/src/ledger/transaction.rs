//! Per-event transaction construction.
//!
//! One pure constructor per business event, each returning the metadata and
//! postings for the Ledger Engine to commit atomically. Validation happens
//! here, before any engine call, so a rejected request has no side effects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::account::{
    CARD_ID_KEY, InternalAccount, MERCHANT_ID_KEY, Metadata, NAME_KEY, PURCHASE_ID_KEY,
    TRANSACTION_TYPE_KEY, WORLD_ACCOUNT,
};

/// A single directed amount transfer between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Source account address.
    pub source: String,
    /// Destination account address.
    pub destination: String,
    /// Non-negative amount in minor units of the ledger asset. Zero-amount
    /// postings exist purely to force account creation.
    pub amount: i64,
}

impl Posting {
    /// Creates a posting.
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>, amount: i64) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            amount,
        }
    }
}

/// Business event that produced a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// A card was funded.
    PurchaseCard,
    /// A card was spent at its merchant.
    SpendCard,
    /// A merchant was paid out.
    PayoutMerchant,
    /// A merchant account was created.
    CreateMerchant,
    /// The fixed internal accounts were created.
    CreateInternalAccount,
}

impl TransactionType {
    /// Returns the metadata value for this transaction type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PurchaseCard => "purchase_card",
            Self::SpendCard => "spend_card",
            Self::PayoutMerchant => "payout_merchant",
            Self::CreateMerchant => "create_merchant",
            Self::CreateInternalAccount => "create_internal_account",
        }
    }
}

/// Errors from transaction construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// An amount field is negative.
    #[error("{field} cannot be negative (got {amount})")]
    NegativeAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        amount: i64,
    },

    /// A split exceeds the gross amount, which would require a negative
    /// posting.
    #[error("{field} ({split}) cannot exceed amount ({amount})")]
    SplitExceedsAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected split value.
        split: i64,
        /// The gross amount.
        amount: i64,
    },
}

/// Metadata and postings for one business event, ready for atomic commit.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPlan {
    /// Descriptive metadata, always tagged with `transaction_type`.
    pub metadata: Metadata,
    /// Postings to commit atomically, length >= 1.
    pub postings: Vec<Posting>,
}

impl TransactionPlan {
    /// Creates the three fixed internal accounts via zero-amount postings.
    ///
    /// The engine creates accounts implicitly on first posting, so a NOOP
    /// transfer from `world` is the account-creation idiom.
    #[must_use]
    pub fn internal_accounts() -> Self {
        let mut metadata = Metadata::new();
        insert_type(&mut metadata, TransactionType::CreateInternalAccount);
        let postings = InternalAccount::ALL
            .iter()
            .map(|account| Posting::new(WORLD_ACCOUNT, account.address(), 0))
            .collect();
        Self { metadata, postings }
    }

    /// Creates a merchant account at `merchant_address` via a zero-amount
    /// posting.
    #[must_use]
    pub fn create_merchant(merchant_address: &str) -> Self {
        let mut metadata = Metadata::new();
        insert_type(&mut metadata, TransactionType::CreateMerchant);
        insert_str(&mut metadata, MERCHANT_ID_KEY, merchant_address);
        Self {
            metadata,
            postings: vec![Posting::new(WORLD_ACCOUNT, merchant_address, 0)],
        }
    }

    /// Funds a new card at `card_address`, splitting the gross `amount`
    /// into card credit, asset debit, and optional revenue/expense legs.
    ///
    /// A split of `Some(0)` is merged with `None` before postings are
    /// built: the card is credited `amount - revenue_take` and assets are
    /// debited `amount - expenses`, with a revenue or expense posting only
    /// when the corresponding split is non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error if any amount is negative, or a split exceeds the
    /// gross amount.
    pub fn purchase_card(
        card_address: &str,
        user_name: &str,
        merchant_address: &str,
        amount: i64,
        revenue_take: Option<i64>,
        expenses: Option<i64>,
    ) -> Result<Self, TransactionError> {
        check_non_negative("amount", amount)?;
        let revenue_take = check_split("revenue_take", revenue_take, amount)?;
        let expenses = check_split("expenses", expenses, amount)?;

        let mut metadata = Metadata::new();
        insert_type(&mut metadata, TransactionType::PurchaseCard);
        insert_str(&mut metadata, CARD_ID_KEY, card_address);
        insert_str(&mut metadata, NAME_KEY, user_name);
        insert_str(&mut metadata, MERCHANT_ID_KEY, merchant_address);

        let card_credit = amount - revenue_take.unwrap_or(0);
        let asset_debit = amount - expenses.unwrap_or(0);

        let mut postings = vec![
            Posting::new(WORLD_ACCOUNT, card_address, card_credit),
            Posting::new(WORLD_ACCOUNT, InternalAccount::Assets.address(), asset_debit),
        ];
        if let Some(revenue) = revenue_take {
            postings.push(Posting::new(
                WORLD_ACCOUNT,
                InternalAccount::Revenue.address(),
                revenue,
            ));
        }
        if let Some(expensed) = expenses {
            postings.push(Posting::new(
                WORLD_ACCOUNT,
                InternalAccount::Expenses.address(),
                expensed,
            ));
        }
        Ok(Self { metadata, postings })
    }

    /// Spends `amount` from a card to its owning merchant.
    ///
    /// `purchase_id` is a fresh correlation identifier stamped into the
    /// metadata only; it is never a posting endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is negative.
    pub fn spend_card(
        card_address: &str,
        merchant_address: &str,
        user_name: &str,
        purchase_id: &str,
        amount: i64,
    ) -> Result<Self, TransactionError> {
        check_non_negative("amount", amount)?;

        let mut metadata = Metadata::new();
        insert_type(&mut metadata, TransactionType::SpendCard);
        insert_str(&mut metadata, CARD_ID_KEY, card_address);
        insert_str(&mut metadata, NAME_KEY, user_name);
        insert_str(&mut metadata, MERCHANT_ID_KEY, merchant_address);
        insert_str(&mut metadata, PURCHASE_ID_KEY, purchase_id);

        Ok(Self {
            metadata,
            postings: vec![Posting::new(card_address, merchant_address, amount)],
        })
    }

    /// Pays out `amount` to a merchant, releasing it from the merchant's
    /// balance and the matching asset holding.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is negative.
    pub fn payout_merchant(merchant_address: &str, amount: i64) -> Result<Self, TransactionError> {
        check_non_negative("amount", amount)?;

        let mut metadata = Metadata::new();
        insert_type(&mut metadata, TransactionType::PayoutMerchant);
        insert_str(&mut metadata, MERCHANT_ID_KEY, merchant_address);

        Ok(Self {
            metadata,
            postings: vec![
                Posting::new(merchant_address, WORLD_ACCOUNT, amount),
                Posting::new(InternalAccount::Assets.address(), WORLD_ACCOUNT, amount),
            ],
        })
    }
}

fn insert_type(metadata: &mut Metadata, transaction_type: TransactionType) {
    insert_str(metadata, TRANSACTION_TYPE_KEY, transaction_type.as_str());
}

fn insert_str(metadata: &mut Metadata, key: &str, value: &str) {
    metadata.insert(key.to_string(), Value::String(value.to_string()));
}

fn check_non_negative(field: &'static str, amount: i64) -> Result<(), TransactionError> {
    if amount < 0 {
        return Err(TransactionError::NegativeAmount { field, amount });
    }
    Ok(())
}

// Merges Some(0) with None so downstream code has a single "no split" case.
fn check_split(
    field: &'static str,
    split: Option<i64>,
    amount: i64,
) -> Result<Option<i64>, TransactionError> {
    match split {
        None | Some(0) => Ok(None),
        Some(value) if value < 0 => Err(TransactionError::NegativeAmount {
            field,
            amount: value,
        }),
        Some(value) if value > amount => Err(TransactionError::SplitExceedsAmount {
            field,
            split: value,
            amount,
        }),
        Some(value) => Ok(Some(value)),
    }
}
