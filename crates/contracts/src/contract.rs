//! Shared read/write plumbing for contract handles.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use crowdfund_config::WalletConfig;
use crowdfund_provider::{PendingTransaction, TransactionRequest, WalletProvider};

use crate::ContractError;

/// How submitted transactions are watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    /// Receipt polling interval.
    pub poll_interval: Duration,
    /// Confirmations to await.
    pub confirmations: u64,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self { poll_interval: Duration::from_secs(1), confirmations: 1 }
    }
}

impl From<&WalletConfig> for TxOptions {
    fn from(config: &WalletConfig) -> Self {
        Self { poll_interval: config.poll_interval(), confirmations: config.confirmations }
    }
}

/// A deployed contract reached through a wallet provider.
#[derive(Debug, Clone)]
pub struct Contract<P> {
    provider: P,
    address: Address,
    from: Option<Address>,
    options: TxOptions,
}

impl<P: WalletProvider + Clone> Contract<P> {
    /// Handle for the contract at `address`.
    pub const fn new(provider: P, address: Address) -> Self {
        let options = TxOptions { poll_interval: Duration::from_secs(1), confirmations: 1 };
        Self { provider, address, from: None, options }
    }

    /// Sends calls from `from`.
    pub const fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Overrides how writes are watched.
    pub const fn with_options(mut self, options: TxOptions) -> Self {
        self.options = options;
        self
    }

    /// Contract address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Account calls are sent from.
    pub const fn sender(&self) -> Option<Address> {
        self.from
    }

    /// Provider the handle talks through.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    fn request(&self, data: Vec<u8>) -> TransactionRequest {
        let request = TransactionRequest::call(self.address, data);
        match self.from {
            Some(from) => request.with_from(from),
            None => request,
        }
    }

    /// Executes a read-only call and decodes its return value.
    pub async fn read<C>(&self, call: C) -> Result<C::Return, ContractError>
    where
        C: SolCall + Send,
    {
        let output = self.provider.call(&self.request(call.abi_encode())).await?;
        tracing::debug!(contract = %self.address, method = C::SIGNATURE, "contract read");
        C::abi_decode_returns(&output)
            .map_err(|e| ContractError::Decode { method: C::SIGNATURE, reason: e.to_string() })
    }

    /// Submits a state-changing call, optionally carrying native value.
    pub async fn write<C>(
        &self,
        call: C,
        value: Option<U256>,
    ) -> Result<PendingTransaction<P>, ContractError>
    where
        C: SolCall + Send,
    {
        let mut request = self.request(call.abi_encode());
        request.value = value;
        let hash = self.provider.send_transaction(request).await?;
        tracing::info!(contract = %self.address, method = C::SIGNATURE, %hash, "contract write submitted");
        Ok(PendingTransaction::new(self.provider.clone(), hash)
            .with_poll_interval(self.options.poll_interval)
            .with_confirmations(self.options.confirmations))
    }
}
