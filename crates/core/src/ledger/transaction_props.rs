//! Property-based tests for transaction construction.

use std::collections::HashMap;

use proptest::prelude::*;

use super::account::{Account, AccountClass, InternalAccount, Metadata, WORLD_ACCOUNT};
use super::summary::summarize;
use super::transaction::TransactionPlan;

fn apply(balances: &mut HashMap<String, i64>, plan: &TransactionPlan) {
    for posting in &plan.postings {
        *balances.entry(posting.source.clone()).or_default() -= posting.amount;
        *balances.entry(posting.destination.clone()).or_default() += posting.amount;
    }
}

/// Scales `amount` by `percent` without leaving integer arithmetic.
fn take(amount: i64, percent: i64) -> i64 {
    amount * percent / 100
}

proptest! {
    /// For all A, 0 <= R,E <= A: the card is credited A-R, assets are
    /// debited A-E, and an R/E posting appears iff the split is non-zero.
    #[test]
    fn test_purchase_card_amount_arithmetic(
        amount in 0i64..1_000_000,
        revenue_percent in 0i64..=100,
        expense_percent in 0i64..=100,
    ) {
        let revenue_take = take(amount, revenue_percent);
        let expenses = take(amount, expense_percent);

        let plan = TransactionPlan::purchase_card(
            "cards:c1",
            "Al",
            "merchant:m1",
            amount,
            Some(revenue_take),
            Some(expenses),
        )
        .unwrap();

        prop_assert_eq!(plan.postings[0].amount, amount - revenue_take);
        prop_assert_eq!(&plan.postings[0].destination, "cards:c1");
        prop_assert_eq!(plan.postings[1].amount, amount - expenses);
        prop_assert_eq!(&plan.postings[1].destination, "assets");

        let expected_len = 2 + usize::from(revenue_take != 0) + usize::from(expenses != 0);
        prop_assert_eq!(plan.postings.len(), expected_len);

        let revenue_total: i64 = plan
            .postings
            .iter()
            .filter(|p| p.destination == "revenue")
            .map(|p| p.amount)
            .sum();
        prop_assert_eq!(revenue_total, revenue_take);

        for posting in &plan.postings {
            prop_assert!(posting.amount >= 0);
            prop_assert_eq!(&posting.source, WORLD_ACCOUNT);
        }
    }

    /// Any purchase -> spend -> payout sequence within balance limits keeps
    /// the aggregate books balanced when every account is classified.
    #[test]
    fn test_card_lifecycle_keeps_books_balanced(
        amount in 0i64..1_000_000,
        revenue_percent in 0i64..=100,
        expense_percent in 0i64..=100,
        spend_percent in 0i64..=100,
        payout_percent in 0i64..=100,
    ) {
        let revenue_take = take(amount, revenue_percent);
        let expenses = take(amount, expense_percent);
        let spend = take(amount - revenue_take, spend_percent);
        let payout = take(spend, payout_percent);

        let accounts = vec![
            Account { address: WORLD_ACCOUNT.to_string(), metadata: Metadata::new() },
            Account {
                address: "assets".to_string(),
                metadata: AccountClass::Internal(InternalAccount::Assets).to_metadata(),
            },
            Account {
                address: "revenue".to_string(),
                metadata: AccountClass::Internal(InternalAccount::Revenue).to_metadata(),
            },
            Account {
                address: "expenses".to_string(),
                metadata: AccountClass::Internal(InternalAccount::Expenses).to_metadata(),
            },
            Account {
                address: "merchant:m1".to_string(),
                metadata: AccountClass::Merchant { name: "M".to_string() }.to_metadata(),
            },
            Account {
                address: "cards:c1".to_string(),
                metadata: AccountClass::Card {
                    name: "Al".to_string(),
                    merchant: "merchant:m1".to_string(),
                }
                .to_metadata(),
            },
        ];

        let mut balances = HashMap::new();
        apply(&mut balances, &TransactionPlan::internal_accounts());
        apply(&mut balances, &TransactionPlan::create_merchant("merchant:m1"));
        apply(
            &mut balances,
            &TransactionPlan::purchase_card(
                "cards:c1",
                "Al",
                "merchant:m1",
                amount,
                Some(revenue_take),
                Some(expenses),
            )
            .unwrap(),
        );
        prop_assert!(summarize(&accounts, &balances).is_balanced());

        apply(
            &mut balances,
            &TransactionPlan::spend_card("cards:c1", "merchant:m1", "Al", "purchase:p1", spend)
                .unwrap(),
        );
        prop_assert!(summarize(&accounts, &balances).is_balanced());

        apply(
            &mut balances,
            &TransactionPlan::payout_merchant("merchant:m1", payout).unwrap(),
        );
        prop_assert!(summarize(&accounts, &balances).is_balanced());
    }
}
