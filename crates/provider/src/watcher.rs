//! Polling source of wallet events for providers without push notifications.

use std::time::Duration;

use alloy_primitives::Address;

use crate::{WalletEvent, WalletEvents, WalletProvider, pending::clamp_interval};

/// Polls accounts and chain id, publishing a [`WalletEvent`] on every change.
///
/// The first poll only records a baseline.
#[derive(Debug)]
pub struct ProviderWatcher<P> {
    provider: P,
    events: WalletEvents,
    interval: Duration,
    last_accounts: Option<Vec<Address>>,
    last_chain: Option<u64>,
}

impl<P: WalletProvider> ProviderWatcher<P> {
    /// Watches `provider`, publishing into `events`.
    ///
    /// A zero `interval` is raised to [`crate::MIN_POLL_INTERVAL`].
    pub const fn new(provider: P, events: WalletEvents, interval: Duration) -> Self {
        let interval = clamp_interval(interval);
        Self { provider, events, interval, last_accounts: None, last_chain: None }
    }

    /// Polls once and publishes whatever changed since the previous poll.
    pub async fn poll_once(&mut self) -> Vec<WalletEvent> {
        let mut changes = Vec::new();

        match self.provider.accounts().await {
            Ok(accounts) => {
                if self.last_accounts.as_ref().is_some_and(|last| *last != accounts) {
                    changes.push(WalletEvent::AccountsChanged(accounts.clone()));
                }
                self.last_accounts = Some(accounts);
            }
            Err(err) => tracing::warn!(error = %err, "failed to poll accounts"),
        }

        match self.provider.chain_id().await {
            Ok(chain_id) => {
                if self.last_chain.is_some_and(|last| last != chain_id) {
                    changes.push(WalletEvent::ChainChanged(chain_id));
                }
                self.last_chain = Some(chain_id);
            }
            Err(err) => tracing::warn!(error = %err, "failed to poll chain id"),
        }

        for change in &changes {
            tracing::debug!(?change, "wallet change detected");
            self.events.publish(change.clone());
        }
        changes
    }

    /// Polls forever at the configured interval.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.poll_once().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonRpcClient, RpcWallet};

    #[tokio::test]
    async fn zero_interval_keeps_polling() {
        let wallet = RpcWallet::new(JsonRpcClient::new("http://127.0.0.1:1").unwrap());
        let watcher = ProviderWatcher::new(wallet.clone(), wallet.events().clone(), Duration::ZERO);
        let handle = tokio::spawn(watcher.run());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());
        handle.abort();
    }
}
