//! Wallet connection configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default receipt and account polling interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Default number of confirmations awaited after a write.
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// How the client signs and watches the wallet.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletConfig {
    /// Hex-encoded secp256k1 key used to sign locally.
    ///
    /// When absent, transactions are sent through node-managed accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    /// Polling interval for receipts and provider notifications.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Confirmations awaited before a write counts as done.
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
}

impl std::fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("confirmations", &self.confirmations)
            .finish()
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            private_key: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            confirmations: DEFAULT_CONFIRMATIONS,
        }
    }
}

impl WalletConfig {
    /// Decodes the configured private key, if any.
    pub fn private_key_bytes(&self) -> Result<Option<[u8; 32]>, ConfigError> {
        let Some(key) = &self.private_key else {
            return Ok(None);
        };
        let raw = key.trim().trim_start_matches("0x");
        let bytes =
            alloy_primitives::hex::decode(raw).map_err(|err| ConfigError::InvalidKey(err.to_string()))?;
        let array: [u8; 32] =
            bytes.as_slice().try_into().map_err(|_| ConfigError::InvalidKeyLength(bytes.len()))?;
        Ok(Some(array))
    }

    /// Checks the polling interval and, when present, the private key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        self.private_key_bytes().map(|_| ())
    }

    /// Polling interval as a [`std::time::Duration`].
    pub const fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

const fn default_confirmations() -> u64 {
    DEFAULT_CONFIRMATIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_default_wallet_config() {
        let config = WalletConfig::default();
        assert!(config.private_key.is_none());
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert_eq!(config.confirmations, 1);
    }

    #[test]
    fn test_private_key_bytes() {
        let config = WalletConfig { private_key: Some(ANVIL_KEY.to_string()), ..Default::default() };
        let bytes = config.private_key_bytes().expect("valid key").expect("present");
        assert_eq!(bytes[0], 0xac);
        assert_eq!(bytes[31], 0x80);
    }

    #[test]
    fn test_private_key_bytes_absent() {
        assert!(WalletConfig::default().private_key_bytes().expect("ok").is_none());
    }

    #[test]
    fn test_private_key_bytes_wrong_length() {
        let config = WalletConfig { private_key: Some("0xabcd".to_string()), ..Default::default() };
        assert!(matches!(config.private_key_bytes(), Err(ConfigError::InvalidKeyLength(2))));
    }

    #[test]
    fn test_private_key_bytes_not_hex() {
        let config = WalletConfig { private_key: Some("zz".repeat(32)), ..Default::default() };
        assert!(matches!(config.private_key_bytes(), Err(ConfigError::InvalidKey(_))));
    }

    #[test]
    fn test_validate_rejects_zero_poll_interval() {
        let config = WalletConfig { poll_interval_ms: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroPollInterval)));
        assert!(WalletConfig::default().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = WalletConfig { private_key: Some(ANVIL_KEY.to_string()), ..Default::default() };
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("ac0974"));
    }
}
