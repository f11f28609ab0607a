//! Request and response types exchanged with a wallet provider.

use alloy_primitives::{Address, B256, Bytes, U64, U256};
use serde::{Deserialize, Serialize};

/// A read call or a transaction to submit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Target contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// ABI-encoded calldata.
    #[serde(default)]
    pub data: Bytes,
    /// Native value attached to the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,
}

impl TransactionRequest {
    /// A call to `to` with `data`.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self { to: Some(to), data: data.into(), ..Default::default() }
    }

    /// Sets the sender.
    pub const fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Attaches native value.
    pub const fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

/// Receipt of an included transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Transaction hash.
    pub transaction_hash: B256,
    /// Block the transaction was included in.
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `1` for success, `0` for revert.
    #[serde(default)]
    pub status: Option<U64>,
    /// Gas used by the transaction.
    #[serde(default)]
    pub gas_used: U64,
}

impl TransactionReceipt {
    /// Whether execution succeeded.
    pub fn succeeded(&self) -> bool {
        self.status.is_none_or(|status| status == U64::from(1))
    }

    /// Inclusion block as a plain integer.
    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

/// A log emitted by a contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics; the first is the event signature hash.
    pub topics: Vec<B256>,
    /// Non-indexed data.
    #[serde(default)]
    pub data: Bytes,
    /// Block the log was emitted in.
    #[serde(default)]
    pub block_number: Option<U64>,
    /// Emitting transaction.
    #[serde(default)]
    pub transaction_hash: Option<B256>,
}

/// Log query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    /// Emitting contract.
    pub address: Address,
    /// Topic constraints by position; `None` matches anything.
    pub topics: Vec<Option<B256>>,
    /// First block to search.
    pub from_block: U64,
}

impl LogFilter {
    /// All logs of `event` emitted by `address` since genesis.
    pub fn event(address: Address, event: B256) -> Self {
        Self { address, topics: vec![Some(event)], from_block: U64::ZERO }
    }

    /// Whether `log` satisfies the filter.
    pub fn matches(&self, log: &Log) -> bool {
        log.address == self.address
            && self.topics.iter().enumerate().all(|(i, topic)| match topic {
                Some(topic) => log.topics.get(i) == Some(topic),
                None => true,
            })
            && log.block_number.is_none_or(|n| n >= self.from_block)
    }
}

/// Native currency description used when adding a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Currency name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimals.
    pub decimals: u8,
}

/// Parameters of `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    /// Chain id as `0x`-prefixed hex.
    pub chain_id: String,
    /// Chain name.
    pub chain_name: String,
    /// RPC endpoints.
    pub rpc_urls: Vec<String>,
    /// Native currency.
    pub native_currency: NativeCurrency,
}

impl From<&crowdfund_config::NetworkConfig> for AddChainParams {
    fn from(network: &crowdfund_config::NetworkConfig) -> Self {
        Self {
            chain_id: network.chain_id_hex(),
            chain_name: network.chain_name.clone(),
            rpc_urls: vec![network.rpc_url.clone()],
            native_currency: NativeCurrency {
                name: network.currency_name.clone(),
                symbol: network.symbol.clone(),
                decimals: network.decimals,
            },
        }
    }
}
