//! Wallet session and connection lifecycle.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod admin;
pub use admin::resolve_admin;

mod context;
pub use context::WalletContext;

mod error;
pub use error::SessionError;

mod session;
pub use session::Session;

mod updates;
pub use updates::{SessionUpdate, SessionUpdates};
