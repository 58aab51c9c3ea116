//! Idempotent startup bootstrap for the internal accounts.

use tracing::info;

use giftledger_core::ledger::{AccountClass, InternalAccount, TransactionPlan};
use giftledger_engine::{EngineError, LedgerEngine};

/// Ensures the `assets`, `revenue`, and `expenses` accounts exist and are
/// classified.
///
/// The engine offers no direct create-account primitive, so the accounts
/// are created with a NOOP zero-amount transaction and classified in a
/// second step. A previous successful run is detected via the assets
/// account carrying metadata, making the whole sequence a no-op.
///
/// # Errors
///
/// Returns an error on any engine failure; callers treat this as fatal to
/// process startup.
pub async fn ensure_internal_accounts(engine: &dyn LedgerEngine) -> Result<(), EngineError> {
    let assets = engine.get_account(InternalAccount::Assets.address()).await?;
    if assets.is_some_and(|account| account.is_classified()) {
        info!("internal accounts already created");
        return Ok(());
    }

    let plan = TransactionPlan::internal_accounts();
    engine.create_transaction(plan.metadata, plan.postings).await?;

    for account in InternalAccount::ALL {
        engine
            .add_account_metadata(
                account.address(),
                AccountClass::Internal(account).to_metadata(),
            )
            .await?;
    }
    info!("successfully created internal accounts");
    Ok(())
}
