//! Page footer.

use std::fmt;

use crowdfund_config::ContractAddresses;
use crowdfund_format::truncate_address;

use crate::Route;

/// Brand, quick links and the deployed contract addresses.
#[derive(Debug, Clone, Copy)]
pub struct Footer {
    contracts: ContractAddresses,
}

impl Footer {
    /// Footer listing `contracts`.
    pub const fn new(contracts: ContractAddresses) -> Self {
        Self { contracts }
    }
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CrowdFund DApp")?;
        writeln!(
            f,
            "A decentralized crowdfunding platform built on Ethereum blockchain with KYC verification."
        )?;
        writeln!(
            f,
            "Quick links: Home {}  Browse Campaigns {}  KYC Verification {}  Create Campaign {}",
            Route::Home,
            Route::Campaigns,
            Route::Kyc,
            Route::CreateCampaign
        )?;
        writeln!(f, "KYC Registry: {}", truncate_address(&self.contracts.kyc_registry.to_string()))?;
        write!(f, "Crowdfunding: {}", truncate_address(&self.contracts.crowdfunding.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_lists_contracts() {
        let rendered = Footer::new(ContractAddresses::default()).to_string();
        assert!(rendered.contains("KYC Registry: 0x9fE4...a6e0"));
        assert!(rendered.contains("Crowdfunding: 0xCf7E...0Fc9"));
        assert!(rendered.contains("Browse Campaigns /campaigns"));
    }
}
