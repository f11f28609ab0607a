//! Wallet provider boundary for the crowdfund client.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::{ProviderError, codes};

mod events;
pub use events::{Broadcast, WalletEvent, WalletEvents};

mod jsonrpc;
pub use jsonrpc::JsonRpcClient;

mod pending;
pub use pending::{MIN_POLL_INTERVAL, PendingTransaction};

mod rpc_wallet;
pub use rpc_wallet::RpcWallet;

mod signer;
pub use signer::LocalSigner;

mod traits;
pub use traits::WalletProvider;

mod types;
pub use types::{AddChainParams, Log, LogFilter, NativeCurrency, TransactionReceipt, TransactionRequest};

mod watcher;
pub use watcher::ProviderWatcher;
