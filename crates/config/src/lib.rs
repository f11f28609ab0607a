//! Configuration types for the crowdfund client.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod app;
pub use app::{AppConfig, ENV_ADMIN_WALLET, ENV_CHAIN_ID, ENV_PRIVATE_KEY, ENV_RPC_URL};

mod contracts;
pub use contracts::{ContractAddresses, DEFAULT_CROWDFUNDING_ADDRESS, DEFAULT_KYC_REGISTRY_ADDRESS};

mod error;
pub use error::ConfigError;

mod network;
pub use network::{
    DEFAULT_CHAIN_ID, DEFAULT_CHAIN_NAME, DEFAULT_CURRENCY_NAME, DEFAULT_RPC_URL, DEFAULT_SYMBOL,
    NetworkConfig,
};

mod wallet;
pub use wallet::{DEFAULT_CONFIRMATIONS, DEFAULT_POLL_INTERVAL_MS, WalletConfig};
