//! [`WalletProvider`] over HTTP JSON-RPC.

use std::sync::Arc;

use alloy_consensus::TxEip1559;
use alloy_primitives::{Address, B256, Bytes, TxKind, U64, U256};
use async_trait::async_trait;
use serde_json::json;

use crate::{
    AddChainParams, JsonRpcClient, LocalSigner, Log, LogFilter, ProviderError, TransactionReceipt,
    TransactionRequest, WalletEvents, WalletProvider, codes,
};

/// Wallet backed by a JSON-RPC node.
///
/// With a [`LocalSigner`] the wallet exposes exactly the signer's account and signs
/// EIP-1559 transactions itself. Without one it relies on accounts managed by the node.
#[derive(Clone, Debug)]
pub struct RpcWallet {
    client: JsonRpcClient,
    signer: Option<Arc<LocalSigner>>,
    events: WalletEvents,
}

impl RpcWallet {
    /// Wallet using node-managed accounts.
    pub fn new(client: JsonRpcClient) -> Self {
        Self { client, signer: None, events: WalletEvents::new() }
    }

    /// Signs locally with `signer`.
    pub fn with_signer(mut self, signer: LocalSigner) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Event registry fed by a [`crate::ProviderWatcher`].
    pub const fn events(&self) -> &WalletEvents {
        &self.events
    }

    /// Underlying JSON-RPC client.
    pub const fn client(&self) -> &JsonRpcClient {
        &self.client
    }

    async fn send_signed(
        &self,
        signer: &LocalSigner,
        mut request: TransactionRequest,
    ) -> Result<B256, ProviderError> {
        let from = signer.address();
        request.from = Some(from);

        let chain_id = self.chain_id().await?;
        let nonce: U64 =
            self.client.request("eth_getTransactionCount", json!([from, "pending"])).await?;
        let gas_limit = match request.gas {
            Some(gas) => gas.to(),
            None => {
                let estimate: U64 =
                    self.client.request("eth_estimateGas", json!([request])).await?;
                padded_gas(estimate.to())
            }
        };
        let gas_price: U256 = self.client.request("eth_gasPrice", json!([])).await?;
        let priority = self
            .client
            .request::<_, U256>("eth_maxPriorityFeePerGas", json!([]))
            .await
            .map_or(0, |fee| fee.saturating_to::<u128>());
        let (max_fee_per_gas, max_priority_fee_per_gas) =
            fee_caps(gas_price.saturating_to(), priority);

        let tx = TxEip1559 {
            chain_id,
            nonce: nonce.to(),
            gas_limit,
            max_fee_per_gas,
            max_priority_fee_per_gas,
            to: request.to.map_or(TxKind::Create, TxKind::Call),
            value: request.value.unwrap_or_default(),
            access_list: Default::default(),
            input: request.data,
        };
        let raw = signer.sign_eip1559(tx)?;
        self.client.request("eth_sendRawTransaction", json!([raw])).await
    }

    async fn ensure_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        if self.chain_id().await? == chain_id {
            Ok(())
        } else {
            Err(ProviderError::Rpc {
                code: codes::UNRECOGNIZED_CHAIN,
                message: format!("Unrecognized chain ID 0x{chain_id:x}"),
            })
        }
    }
}

/// Pads a gas estimate by a fifth, since state can change before inclusion.
fn padded_gas(estimate: u64) -> u64 {
    estimate.saturating_add(estimate / 5)
}

/// Fee caps from the node's gas price and suggested tip.
///
/// The fee cap allows the base fee to double before the transaction is priced out.
fn fee_caps(gas_price: u128, priority: u128) -> (u128, u128) {
    let max_fee = gas_price.saturating_mul(2).saturating_add(priority);
    (max_fee, priority.min(max_fee))
}

fn is_method_not_found(err: &ProviderError) -> bool {
    matches!(err.code(), Some(codes::METHOD_NOT_FOUND | codes::UNSUPPORTED_METHOD))
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        if let Some(signer) = &self.signer {
            return Ok(vec![signer.address()]);
        }
        match self.client.request("eth_requestAccounts", json!([])).await {
            Err(err) if is_method_not_found(&err) => self.accounts().await,
            other => other,
        }
    }

    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        if let Some(signer) = &self.signer {
            return Ok(vec![signer.address()]);
        }
        self.client.request("eth_accounts", json!([])).await
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        let id: U64 = self.client.request("eth_chainId", json!([])).await?;
        Ok(id.to())
    }

    async fn block_number(&self) -> Result<u64, ProviderError> {
        let number: U64 = self.client.request("eth_blockNumber", json!([])).await?;
        Ok(number.to())
    }

    async fn balance(&self, address: Address) -> Result<U256, ProviderError> {
        self.client.request("eth_getBalance", json!([address, "latest"])).await
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, ProviderError> {
        self.client.request("eth_call", json!([request, "latest"])).await
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ProviderError> {
        let hash = match &self.signer {
            Some(signer) => self.send_signed(signer, request).await?,
            None => self.client.request("eth_sendTransaction", json!([request])).await?,
        };
        tracing::info!(%hash, "transaction submitted");
        Ok(hash)
    }

    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        self.client.request("eth_getTransactionReceipt", json!([hash])).await
    }

    async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ProviderError> {
        self.client.request("eth_getLogs", json!([filter])).await
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        if self.signer.is_some() {
            return self.ensure_chain(chain_id).await;
        }
        let params = json!([{ "chainId": format!("0x{chain_id:x}") }]);
        match self.client.request::<_, serde_json::Value>("wallet_switchEthereumChain", params).await
        {
            Ok(_) => Ok(()),
            Err(err) if is_method_not_found(&err) => self.ensure_chain(chain_id).await,
            Err(err) => Err(err),
        }
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderError> {
        if self.signer.is_some() {
            return Err(ProviderError::Rpc {
                code: codes::UNSUPPORTED_METHOD,
                message: "a local signer cannot add chains".to_string(),
            });
        }
        self.client
            .request::<_, serde_json::Value>("wallet_addEthereumChain", json!([params]))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::hex;
    use rstest::rstest;

    use super::*;

    const ANVIL_KEY: [u8; 32] =
        hex!("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");

    fn wallet() -> RpcWallet {
        RpcWallet::new(JsonRpcClient::new("http://127.0.0.1:1").unwrap())
    }

    #[tokio::test]
    async fn test_signer_wallet_exposes_signer_account() {
        let signer = LocalSigner::from_bytes(&ANVIL_KEY).unwrap();
        let address = signer.address();
        let wallet = wallet().with_signer(signer);
        assert_eq!(wallet.request_accounts().await.unwrap(), vec![address]);
        assert_eq!(wallet.accounts().await.unwrap(), vec![address]);
    }

    #[tokio::test]
    async fn test_signer_wallet_cannot_add_chain() {
        let wallet = wallet().with_signer(LocalSigner::from_bytes(&ANVIL_KEY).unwrap());
        let params = AddChainParams::from(&crowdfund_config::NetworkConfig::default());
        let err = wallet.add_chain(&params).await.unwrap_err();
        assert_eq!(err.code(), Some(codes::UNSUPPORTED_METHOD));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        let err = wallet().chain_id().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[test]
    fn test_method_not_found_detection() {
        assert!(is_method_not_found(&ProviderError::from_rpc(-32601, "Method not found")));
        assert!(is_method_not_found(&ProviderError::from_rpc(4200, "Unsupported")));
        assert!(!is_method_not_found(&ProviderError::from_rpc(4902, "Unrecognized chain")));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(21_000, 25_200)]
    #[case(100_000, 120_000)]
    #[case(u64::MAX, u64::MAX)]
    fn test_padded_gas(#[case] estimate: u64, #[case] expected: u64) {
        assert_eq!(padded_gas(estimate), expected);
    }

    #[rstest]
    #[case(10, 0, (20, 0))]
    #[case(10, 2, (22, 2))]
    #[case(u128::MAX, 5, (u128::MAX, 5))]
    fn test_fee_caps(#[case] gas_price: u128, #[case] priority: u128, #[case] expected: (u128, u128)) {
        assert_eq!(fee_caps(gas_price, priority), expected);
    }
}
