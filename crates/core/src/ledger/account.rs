//! Account addressing and classification.
//!
//! The Ledger Engine has no native concept of account type: the metadata
//! vocabulary defined here is the only place classification and business
//! attributes live. [`AccountClass`] is the typed model of that vocabulary,
//! with an explicit serialization boundary to the engine's untyped
//! metadata map.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Untyped key/value metadata as stored by the Ledger Engine.
pub type Metadata = serde_json::Map<String, Value>;

/// Metadata key carrying the business event that produced a transaction.
pub const TRANSACTION_TYPE_KEY: &str = "transaction_type";
/// Metadata key carrying a card account address.
pub const CARD_ID_KEY: &str = "card_id";
/// Metadata key carrying a merchant account address.
pub const MERCHANT_ID_KEY: &str = "merchant_id";
/// Metadata key carrying a human-readable label.
pub const NAME_KEY: &str = "name";
/// Metadata key carrying a purchase correlation identifier.
pub const PURCHASE_ID_KEY: &str = "purchase_id";
/// Metadata key classifying an account as credit- or debit-normal.
pub const BALANCE_TYPE_KEY: &str = "balance_type";
/// Metadata key classifying an account as internal or external.
pub const LEDGERABLE_TYPE_KEY: &str = "ledgerable_type";

/// Well-known unlimited source/sink account.
pub const WORLD_ACCOUNT: &str = "world";

/// Returns the string value stored under `key`, if present.
#[must_use]
pub fn metadata_str<'a>(metadata: &'a Metadata, key: &str) -> Option<&'a str> {
    metadata.get(key).and_then(Value::as_str)
}

/// Which side of an account is economically "normal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceType {
    /// Credit-normal account.
    Credit,
    /// Debit-normal account.
    Debit,
}

impl BalanceType {
    /// Returns the metadata value for this balance type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

/// Whether an account represents the business's own books or an outside
/// party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerableType {
    /// The business's own books (assets, revenue, expenses).
    Internal,
    /// An outside party (merchant or card).
    External,
}

impl LedgerableType {
    /// Returns the metadata value for this ledgerable type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// The three fixed internal accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalAccount {
    /// Funds held on behalf of cardholders.
    Assets,
    /// Revenue taken on card purchases.
    Revenue,
    /// Costs expensed on card purchases (ex. cc fees).
    Expenses,
}

impl InternalAccount {
    /// All internal accounts, in bootstrap order.
    pub const ALL: [Self; 3] = [Self::Assets, Self::Revenue, Self::Expenses];

    /// Returns the fixed ledger address of this account.
    #[must_use]
    pub const fn address(self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::Revenue => "revenue",
            Self::Expenses => "expenses",
        }
    }

    /// Returns which side of this account is normal.
    ///
    /// Assets and expenses are debit-normal; revenue is credit-normal.
    #[must_use]
    pub const fn balance_type(self) -> BalanceType {
        match self {
            Self::Assets | Self::Expenses => BalanceType::Debit,
            Self::Revenue => BalanceType::Credit,
        }
    }
}

/// Account kinds carrying a generated, type-prefixed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// A merchant selling gift cards.
    Merchant,
    /// A prepaid card held by a user.
    Card,
    /// A purchase correlation identifier (metadata only, never posted to).
    Purchase,
}

impl AccountKind {
    /// Returns the address prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Merchant => "merchant",
            Self::Card => "cards",
            Self::Purchase => "purchase",
        }
    }

    /// Generates a globally unique address for this kind.
    ///
    /// The suffix is a random UUID with hyphens stripped: 128 bits of
    /// entropy, ASCII only, safe as an engine routing key.
    #[must_use]
    pub fn new_address(self) -> String {
        format!("{}:{}", self.prefix(), Uuid::new_v4().simple())
    }
}

/// Typed classification of an account.
///
/// `balance_type` and `ledgerable_type` are derived from the variant and
/// only materialize at the serialization boundary in [`Self::to_metadata`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountClass {
    /// One of the three fixed internal accounts.
    Internal(InternalAccount),
    /// A merchant account.
    Merchant {
        /// Merchant display name.
        name: String,
    },
    /// A card account.
    Card {
        /// Cardholder name.
        name: String,
        /// Address of the merchant the card was purchased from.
        merchant: String,
    },
}

impl AccountClass {
    /// Returns which side of the account is normal.
    ///
    /// Merchants and cards hold funds owed to outside parties, so both are
    /// credit-normal.
    #[must_use]
    pub const fn balance_type(&self) -> BalanceType {
        match self {
            Self::Internal(account) => account.balance_type(),
            Self::Merchant { .. } | Self::Card { .. } => BalanceType::Credit,
        }
    }

    /// Returns whether the account is internal or external.
    #[must_use]
    pub const fn ledgerable_type(&self) -> LedgerableType {
        match self {
            Self::Internal(_) => LedgerableType::Internal,
            Self::Merchant { .. } | Self::Card { .. } => LedgerableType::External,
        }
    }

    /// Serializes this classification into the engine's untyped metadata
    /// format.
    #[must_use]
    pub fn to_metadata(&self) -> Metadata {
        let mut metadata = Metadata::new();
        match self {
            Self::Internal(_) => {}
            Self::Merchant { name } => {
                metadata.insert(NAME_KEY.to_string(), Value::String(name.clone()));
            }
            Self::Card { name, merchant } => {
                metadata.insert(NAME_KEY.to_string(), Value::String(name.clone()));
                metadata.insert(MERCHANT_ID_KEY.to_string(), Value::String(merchant.clone()));
            }
        }
        metadata.insert(
            BALANCE_TYPE_KEY.to_string(),
            Value::String(self.balance_type().as_str().to_string()),
        );
        metadata.insert(
            LEDGERABLE_TYPE_KEY.to_string(),
            Value::String(self.ledgerable_type().as_str().to_string()),
        );
        metadata
    }
}

/// An account as reported by the Ledger Engine: an address plus whatever
/// metadata has been attached to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Globally unique, type-prefixed address.
    pub address: String,
    /// Attached metadata. Empty for accounts whose classification step has
    /// not completed.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Account {
    /// Returns the classification tag of this account, if it has one.
    #[must_use]
    pub fn balance_type(&self) -> Option<BalanceType> {
        match metadata_str(&self.metadata, BALANCE_TYPE_KEY)? {
            "credit" => Some(BalanceType::Credit),
            "debit" => Some(BalanceType::Debit),
            _ => None,
        }
    }

    /// Returns true if classification metadata has been attached.
    #[must_use]
    pub fn is_classified(&self) -> bool {
        !self.metadata.is_empty()
    }
}
