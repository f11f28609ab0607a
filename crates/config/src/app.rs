//! Top-level client configuration.

use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ContractAddresses, NetworkConfig, WalletConfig};

/// Environment variable overriding the JSON-RPC endpoint.
pub const ENV_RPC_URL: &str = "CROWDFUND_RPC_URL";

/// Environment variable overriding the chain id.
pub const ENV_CHAIN_ID: &str = "CROWDFUND_CHAIN_ID";

/// Environment variable naming the admin wallet.
pub const ENV_ADMIN_WALLET: &str = "CROWDFUND_ADMIN_WALLET";

/// Environment variable carrying the signing key.
pub const ENV_PRIVATE_KEY: &str = "CROWDFUND_PRIVATE_KEY";

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Target network.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Contract addresses.
    #[serde(default)]
    pub contracts: ContractAddresses,

    /// Address allowed to review KYC requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_wallet: Option<Address>,

    /// Wallet connection settings.
    #[serde(default)]
    pub wallet: WalletConfig,
}

impl AppConfig {
    /// Loads configuration from `path`, or defaults when no path is given.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        tracing::debug!(path = %path.display(), "loaded config file");
        config.validate()?;
        Ok(config)
    }

    /// Checks values that would otherwise fail later at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.wallet.validate()
    }

    /// Applies overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_RPC_URL) {
            self.network.rpc_url = url;
        }
        if let Some(raw) = lookup(ENV_CHAIN_ID) {
            self.network.chain_id = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { field: "chain_id", value: raw })?;
        }
        if let Some(raw) = lookup(ENV_ADMIN_WALLET).filter(|v| !v.trim().is_empty()) {
            self.admin_wallet = Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidAddress { field: "admin_wallet", value: raw })?,
            );
        }
        if let Some(key) = lookup(ENV_PRIVATE_KEY).filter(|v| !v.trim().is_empty()) {
            self.wallet.private_key = Some(key);
        }
        Ok(self)
    }
}
