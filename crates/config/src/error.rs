//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when loading or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse JSON configuration.
    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An address value was not a 20-byte hex string.
    #[error("invalid address for {field}: {value}")]
    InvalidAddress {
        /// The configuration field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A numeric value could not be parsed.
    #[error("invalid number for {field}: {value}")]
    InvalidNumber {
        /// The configuration field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The wallet private key was not valid hex.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// The wallet private key was not 32 bytes long.
    #[error("invalid private key: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The polling interval was zero.
    #[error("wallet.poll_interval_ms must be at least 1")]
    ZeroPollInterval,
}
