//! Two-phase handling of contract writes.

use crowdfund_contracts::ContractError;
use crowdfund_provider::{PendingTransaction, TransactionReceipt, WalletProvider};

use crate::{Notice, Outcome};

/// Reports a submitted write, then waits for it to be confirmed.
///
/// Returns the receipt once confirmed. Failures in either phase are recorded as a
/// translated error notice and yield `None`.
pub(crate) async fn confirm<P>(
    submitted: Result<PendingTransaction<P>, ContractError>,
    submitted_message: &str,
    outcome: &mut Outcome,
) -> Option<TransactionReceipt>
where
    P: WalletProvider,
{
    let pending = accept(submitted, submitted_message, outcome)?;
    settle(pending, outcome).await
}

/// Records the submission phase of a write.
pub(crate) fn accept<P>(
    submitted: Result<PendingTransaction<P>, ContractError>,
    submitted_message: &str,
    outcome: &mut Outcome,
) -> Option<PendingTransaction<P>>
where
    P: WalletProvider,
{
    match submitted {
        Ok(pending) => {
            outcome.push(Notice::info(submitted_message));
            Some(pending)
        }
        Err(err) => {
            tracing::warn!(error = %err, "transaction not submitted");
            outcome.push(Notice::error(err.kind().user_message()));
            None
        }
    }
}

/// Waits for an accepted write to be mined.
pub(crate) async fn settle<P>(
    pending: PendingTransaction<P>,
    outcome: &mut Outcome,
) -> Option<TransactionReceipt>
where
    P: WalletProvider,
{
    let hash = pending.hash();
    match pending.wait().await {
        Ok(receipt) => {
            tracing::info!(%hash, block = ?receipt.block(), "transaction confirmed");
            Some(receipt)
        }
        Err(err) => {
            tracing::warn!(%hash, error = %err, "transaction failed");
            outcome.push(Notice::error(err.kind().user_message()));
            None
        }
    }
}
