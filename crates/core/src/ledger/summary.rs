//! Ledger consistency aggregation.
//!
//! Recomputes aggregate debits/credits and the three canonical internal
//! balances from the full account and balance population, independent of
//! the Ledger Engine's own bookkeeping. `debits == credits` over the full
//! population is the systemic health check: a mismatch indicates a builder
//! bug or a partial failure during account classification.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::account::{Account, BalanceType, InternalAccount};

/// Balance-sheet sanity view over the whole ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of balances of debit-normal accounts.
    pub debits: i64,
    /// Sum of balances of credit-normal accounts.
    pub credits: i64,
    /// Balance of the fixed `assets` account.
    pub assets: i64,
    /// Balance of the fixed `revenue` account.
    pub revenue: i64,
    /// Balance of the fixed `expenses` account.
    pub expenses: i64,
}

impl LedgerSummary {
    /// Returns true if the books balance.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.debits == self.credits
    }
}

/// Aggregates the full account population into a [`LedgerSummary`].
///
/// Accounts without a `balance_type` tag (the `world` faucet, or an account
/// whose classification step never completed) are excluded from both sums.
/// An account missing from `balances` has never been posted to and counts
/// as zero.
#[must_use]
pub fn summarize(accounts: &[Account], balances: &HashMap<String, i64>) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    for account in accounts {
        let balance = balances.get(&account.address).copied().unwrap_or(0);
        for internal in InternalAccount::ALL {
            if account.address == internal.address() {
                match internal {
                    InternalAccount::Assets => summary.assets = balance,
                    InternalAccount::Revenue => summary.revenue = balance,
                    InternalAccount::Expenses => summary.expenses = balance,
                }
            }
        }
        match account.balance_type() {
            Some(BalanceType::Credit) => summary.credits += balance,
            Some(BalanceType::Debit) => summary.debits += balance,
            None => {}
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::super::account::{AccountClass, BALANCE_TYPE_KEY, Metadata};
    use super::super::transaction::TransactionPlan;
    use super::*;

    fn classified(address: &str, class: &AccountClass) -> Account {
        Account {
            address: address.to_string(),
            metadata: class.to_metadata(),
        }
    }

    fn unclassified(address: &str) -> Account {
        Account {
            address: address.to_string(),
            metadata: Metadata::new(),
        }
    }

    /// Applies a plan's postings the way the engine does: destination
    /// receives, source pays.
    fn apply(balances: &mut HashMap<String, i64>, plan: &TransactionPlan) {
        for posting in &plan.postings {
            *balances.entry(posting.source.clone()).or_default() -= posting.amount;
            *balances.entry(posting.destination.clone()).or_default() += posting.amount;
        }
    }

    fn acme_scenario() -> (Vec<Account>, HashMap<String, i64>) {
        let accounts = vec![
            unclassified("world"),
            classified("assets", &AccountClass::Internal(InternalAccount::Assets)),
            classified("revenue", &AccountClass::Internal(InternalAccount::Revenue)),
            classified("expenses", &AccountClass::Internal(InternalAccount::Expenses)),
            classified(
                "merchant:acme",
                &AccountClass::Merchant {
                    name: "Acme".to_string(),
                },
            ),
            classified(
                "cards:al",
                &AccountClass::Card {
                    name: "Al".to_string(),
                    merchant: "merchant:acme".to_string(),
                },
            ),
        ];

        let mut balances = HashMap::new();
        apply(&mut balances, &TransactionPlan::internal_accounts());
        apply(&mut balances, &TransactionPlan::create_merchant("merchant:acme"));
        apply(
            &mut balances,
            &TransactionPlan::purchase_card("cards:al", "Al", "merchant:acme", 1000, Some(100), Some(50))
                .unwrap(),
        );
        (accounts, balances)
    }

    #[test]
    fn test_purchase_leaves_books_balanced() {
        let (accounts, balances) = acme_scenario();
        let summary = summarize(&accounts, &balances);

        assert_eq!(summary.assets, 950);
        assert_eq!(summary.revenue, 100);
        assert_eq!(summary.expenses, 50);
        // card 900 + revenue 100 vs assets 950 + expenses 50
        assert_eq!(summary.credits, 1000);
        assert_eq!(summary.debits, 1000);
        assert!(summary.is_balanced());
    }

    #[test]
    fn test_full_card_lifecycle_stays_balanced() {
        let (accounts, mut balances) = acme_scenario();

        apply(
            &mut balances,
            &TransactionPlan::spend_card("cards:al", "merchant:acme", "Al", "purchase:p1", 900)
                .unwrap(),
        );
        let after_spend = summarize(&accounts, &balances);
        assert!(after_spend.is_balanced());
        assert_eq!(balances["cards:al"], 0);
        assert_eq!(balances["merchant:acme"], 900);

        apply(
            &mut balances,
            &TransactionPlan::payout_merchant("merchant:acme", 900).unwrap(),
        );
        let after_payout = summarize(&accounts, &balances);
        assert!(after_payout.is_balanced());
        assert_eq!(after_payout.assets, 50);
        assert_eq!(after_payout.credits, 100);
        assert_eq!(after_payout.debits, 100);
    }

    #[test]
    fn test_unclassified_account_is_excluded_from_both_sums() {
        let (mut accounts, mut balances) = acme_scenario();
        let balanced = summarize(&accounts, &balances);
        assert!(balanced.is_balanced());

        // A second card funded but never classified: its credit leg
        // silently drops out of the sums and the imbalance shows.
        accounts.push(unclassified("cards:ghost"));
        apply(
            &mut balances,
            &TransactionPlan::purchase_card("cards:ghost", "Bo", "merchant:acme", 500, None, None)
                .unwrap(),
        );
        let summary = summarize(&accounts, &balances);
        assert_eq!(summary.credits, balanced.credits);
        assert_eq!(summary.debits, balanced.debits + 500);
        assert!(!summary.is_balanced());
    }

    #[test]
    fn test_account_missing_from_balances_counts_as_zero() {
        let accounts = vec![classified(
            "merchant:new",
            &AccountClass::Merchant {
                name: "New".to_string(),
            },
        )];
        let summary = summarize(&accounts, &HashMap::new());
        assert_eq!(summary, LedgerSummary::default());
    }

    #[test]
    fn test_malformed_balance_type_tag_is_ignored() {
        let mut metadata = Metadata::new();
        metadata.insert(
            BALANCE_TYPE_KEY.to_string(),
            Value::String("sideways".to_string()),
        );
        let accounts = vec![Account {
            address: "cards:odd".to_string(),
            metadata,
        }];
        let balances = HashMap::from([("cards:odd".to_string(), 123)]);
        let summary = summarize(&accounts, &balances);
        assert_eq!(summary.credits, 0);
        assert_eq!(summary.debits, 0);
    }
}
