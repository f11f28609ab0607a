//! Deployed contract addresses.

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};

/// KYC registry address of the local deployment.
pub const DEFAULT_KYC_REGISTRY_ADDRESS: Address =
    address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");

/// Crowdfunding contract address of the local deployment.
pub const DEFAULT_CROWDFUNDING_ADDRESS: Address =
    address!("0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9");

/// Addresses of the two contracts the client talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContractAddresses {
    /// KYC registry.
    #[serde(default = "default_kyc_registry")]
    pub kyc_registry: Address,

    /// Crowdfunding ledger.
    #[serde(default = "default_crowdfunding")]
    pub crowdfunding: Address,
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self { kyc_registry: DEFAULT_KYC_REGISTRY_ADDRESS, crowdfunding: DEFAULT_CROWDFUNDING_ADDRESS }
    }
}

const fn default_kyc_registry() -> Address {
    DEFAULT_KYC_REGISTRY_ADDRESS
}

const fn default_crowdfunding() -> Address {
    DEFAULT_CROWDFUNDING_ADDRESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addresses() {
        let addrs = ContractAddresses::default();
        assert_eq!(
            addrs.kyc_registry.to_checksum(None),
            "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0"
        );
        assert_eq!(
            addrs.crowdfunding.to_checksum(None),
            "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9"
        );
    }

    #[test]
    fn test_addresses_toml_override() {
        let addrs: ContractAddresses =
            toml::from_str("crowdfunding = \"0x5FbDB2315678afecb367f032d93F642f64180aa3\"")
                .expect("deserialize toml");
        assert_eq!(addrs.kyc_registry, DEFAULT_KYC_REGISTRY_ADDRESS);
        assert_eq!(
            addrs.crowdfunding.to_checksum(None),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }
}
