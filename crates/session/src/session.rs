//! The session object.

use alloy_primitives::Address;
use crowdfund_contracts::{Contracts, KycRecord};
use crowdfund_format::{KycStatus, format_display, parse_ether};

/// The connected wallet and everything derived from it.
///
/// Created empty, filled by [`crate::WalletContext::connect`] and never persisted.
#[derive(Debug, Clone)]
pub struct Session<P> {
    /// Connected account.
    pub account: Option<Address>,
    /// Native balance in display units, full precision.
    pub balance: String,
    /// Chain the wallet reported at connect time.
    pub chain_id: Option<u64>,
    /// The account administers the KYC registry.
    pub is_admin: bool,
    /// The account passed KYC.
    pub is_verified: bool,
    /// The account's KYC record, when it was read.
    pub kyc_status: Option<KycRecord>,
    /// Contract handles bound to the account.
    pub contracts: Option<Contracts<P>>,
}

impl<P> Default for Session<P> {
    fn default() -> Self {
        Self {
            account: None,
            balance: "0".to_string(),
            chain_id: None,
            is_admin: false,
            is_verified: false,
            kyc_status: None,
            contracts: None,
        }
    }
}

impl<P> Session<P> {
    /// Whether an account is connected.
    pub const fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Whether the account may open campaigns.
    pub const fn can_create(&self) -> bool {
        self.is_verified || self.is_admin
    }

    /// KYC status of the account; not submitted when unknown.
    pub fn kyc(&self) -> KycStatus {
        self.kyc_status.as_ref().map_or(KycStatus::NotSubmitted, KycRecord::status)
    }

    /// Balance with four decimals.
    pub fn balance_display(&self) -> String {
        parse_ether(&self.balance).map_or_else(|_| self.balance.clone(), format_display)
    }
}
