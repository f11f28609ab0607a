//! The wallet provider trait.

use std::{fmt::Debug, sync::Arc};

use alloy_primitives::{Address, B256, Bytes, U256};
use async_trait::async_trait;

use crate::{AddChainParams, Log, LogFilter, ProviderError, TransactionReceipt, TransactionRequest};

/// What an injected wallet offers the client.
///
/// Read methods never prompt the user. `request_accounts`, `send_transaction`,
/// `switch_chain` and `add_chain` may, and fail with
/// [`ProviderError::UserRejected`] when declined.
#[async_trait]
pub trait WalletProvider: Debug + Send + Sync {
    /// Asks the user for account access and returns the authorized accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Accounts already authorized, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Chain id the wallet is connected to.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Latest block number.
    async fn block_number(&self) -> Result<u64, ProviderError>;

    /// Native balance of `address` in base units.
    async fn balance(&self, address: Address) -> Result<U256, ProviderError>;

    /// Executes a read-only call.
    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, ProviderError>;

    /// Signs and submits a transaction, returning its hash.
    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ProviderError>;

    /// Receipt of `hash`, or `None` while pending.
    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, ProviderError>;

    /// Historical logs matching `filter`.
    async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ProviderError>;

    /// Asks the wallet to switch to `chain_id`.
    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;

    /// Asks the wallet to add a chain it does not know.
    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderError>;
}

#[async_trait]
impl<T: WalletProvider + ?Sized> WalletProvider for Arc<T> {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        (**self).request_accounts().await
    }

    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        (**self).accounts().await
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        (**self).chain_id().await
    }

    async fn block_number(&self) -> Result<u64, ProviderError> {
        (**self).block_number().await
    }

    async fn balance(&self, address: Address) -> Result<U256, ProviderError> {
        (**self).balance(address).await
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, ProviderError> {
        (**self).call(request).await
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ProviderError> {
        (**self).send_transaction(request).await
    }

    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        (**self).transaction_receipt(hash).await
    }

    async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ProviderError> {
        (**self).logs(filter).await
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        (**self).switch_chain(chain_id).await
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderError> {
        (**self).add_chain(params).await
    }
}
