//! Bindings and typed handles for the crowdfund contracts.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod bindings;
pub use bindings::{ICrowdfunding, IKycRegistry};

mod contract;
pub use contract::{Contract, TxOptions};

mod crowdfunding;
pub use crowdfunding::Crowdfunding;

mod error;
pub use error::ContractError;

mod handles;
pub use handles::Contracts;

mod kyc;
pub use kyc::KycRegistry;

mod types;
pub use types::{Campaign, KycRecord, PendingKyc};

#[cfg(feature = "test-utils")]
mod test_utils;

#[cfg(feature = "test-utils")]
pub use test_utils::{MockChain, MockChainBuilder};
