//! Network configuration.

use serde::{Deserialize, Serialize};

/// Default chain id (local Anvil).
pub const DEFAULT_CHAIN_ID: u64 = 31337;

/// Default chain name shown when adding the network to a wallet.
pub const DEFAULT_CHAIN_NAME: &str = "Localhost 31337";

/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Default native currency name.
pub const DEFAULT_CURRENCY_NAME: &str = "Ether";

/// Default native currency symbol.
pub const DEFAULT_SYMBOL: &str = "ETH";

/// Target network configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Chain id the contracts are deployed on.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Chain name used when the wallet does not know the network.
    #[serde(default = "default_chain_name")]
    pub chain_name: String,

    /// JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Native currency name.
    #[serde(default = "default_currency_name")]
    pub currency_name: String,

    /// Native currency symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Native currency decimals.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            chain_name: DEFAULT_CHAIN_NAME.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            currency_name: DEFAULT_CURRENCY_NAME.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            decimals: default_decimals(),
        }
    }
}

impl NetworkConfig {
    /// Chain id as the `0x`-prefixed hex string wallets expect.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

const fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

fn default_chain_name() -> String {
    DEFAULT_CHAIN_NAME.to_string()
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_currency_name() -> String {
    DEFAULT_CURRENCY_NAME.to_string()
}

fn default_symbol() -> String {
    DEFAULT_SYMBOL.to_string()
}

const fn default_decimals() -> u8 {
    18
}
