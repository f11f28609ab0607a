//! Two-phase write handling: submitted, then confirmed.

use std::time::Duration;

use alloy_primitives::B256;

use crate::{ProviderError, TransactionReceipt, WalletProvider};

/// Shortest interval used for polling; zero is raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// `interval`, or [`MIN_POLL_INTERVAL`] when it is zero.
pub(crate) const fn clamp_interval(interval: Duration) -> Duration {
    if interval.is_zero() { MIN_POLL_INTERVAL } else { interval }
}

/// A submitted transaction awaiting inclusion.
///
/// Dropping it does not cancel the transaction; it only stops watching.
#[derive(Debug)]
#[must_use = "a pending transaction does nothing unless awaited"]
pub struct PendingTransaction<P> {
    provider: P,
    hash: B256,
    poll_interval: Duration,
    confirmations: u64,
}

impl<P: WalletProvider> PendingTransaction<P> {
    /// Watches `hash` through `provider`.
    pub const fn new(provider: P, hash: B256) -> Self {
        Self { provider, hash, poll_interval: Duration::from_secs(1), confirmations: 1 }
    }

    /// Sets the receipt polling interval; zero is raised to [`MIN_POLL_INTERVAL`].
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = clamp_interval(poll_interval);
        self
    }

    /// Sets the number of confirmations to await.
    pub const fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// Transaction hash.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Waits until the transaction is included with enough confirmations.
    ///
    /// There is no timeout; the wait is bounded only by the provider.
    pub async fn wait(self) -> Result<TransactionReceipt, ProviderError> {
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(self.hash).await? {
                if !receipt.succeeded() {
                    tracing::warn!(hash = %self.hash, "transaction reverted");
                    return Err(ProviderError::Reverted(self.hash));
                }
                if self.confirmed(&receipt).await? {
                    tracing::debug!(hash = %self.hash, block = ?receipt.block(), "transaction confirmed");
                    return Ok(receipt);
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn confirmed(&self, receipt: &TransactionReceipt) -> Result<bool, ProviderError> {
        if self.confirmations <= 1 {
            return Ok(true);
        }
        let Some(included) = receipt.block() else {
            return Ok(false);
        };
        let head = self.provider.block_number().await?;
        Ok(head.saturating_sub(included) + 1 >= self.confirmations)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Duration::ZERO, MIN_POLL_INTERVAL)]
    #[case(Duration::from_millis(250), Duration::from_millis(250))]
    fn test_clamp_interval(#[case] interval: Duration, #[case] expected: Duration) {
        assert_eq!(clamp_interval(interval), expected);
    }
}
