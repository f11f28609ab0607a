//! Both contract handles, bound to one provider and account.

use alloy_primitives::Address;
use crowdfund_config::ContractAddresses;
use crowdfund_provider::WalletProvider;

use crate::{Contract, Crowdfunding, KycRegistry, TxOptions};

/// Handles for the KYC registry and the crowdfunding contract.
#[derive(Debug, Clone)]
pub struct Contracts<P> {
    /// KYC registry.
    pub kyc: KycRegistry<P>,
    /// Crowdfunding contract.
    pub crowdfunding: Crowdfunding<P>,
}

impl<P: WalletProvider + Clone> Contracts<P> {
    /// Binds both contracts to `provider`, sending from `account`.
    pub fn new(
        provider: P,
        addresses: &ContractAddresses,
        account: Address,
        options: TxOptions,
    ) -> Self {
        let bind = |address| {
            Contract::new(provider.clone(), address).with_from(account).with_options(options)
        };
        Self {
            kyc: KycRegistry::new(bind(addresses.kyc_registry)),
            crowdfunding: Crowdfunding::new(bind(addresses.crowdfunding)),
        }
    }
}
