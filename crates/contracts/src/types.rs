//! View projections of contract records.

use alloy_primitives::{Address, U256};
use crowdfund_format::{CampaignStatus, KycStatus, calculate_percentage, progress_width};
use serde::{Deserialize, Serialize};

use crate::{ICrowdfunding, IKycRegistry};

/// A campaign as read from the crowdfunding contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// One-based campaign id.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Funding goal in base units.
    pub goal: U256,
    /// Contributions received so far, in base units.
    pub funds_raised: U256,
    /// Creator address; zero for ids that were never created.
    pub creator: Address,
    /// Accepting contributions.
    pub active: bool,
    /// Goal reached.
    pub completed: bool,
    /// Funds withdrawn by the creator.
    pub withdrawn: bool,
}

impl Campaign {
    /// Builds the projection of record `id`.
    pub fn from_record(id: u64, record: ICrowdfunding::campaignsReturn) -> Self {
        Self {
            id,
            title: record.title,
            description: record.description,
            goal: record.goal,
            funds_raised: record.fundsRaised,
            creator: record.creator,
            active: record.active,
            completed: record.completed,
            withdrawn: record.withdrawn,
        }
    }

    /// Whether the record was ever created.
    pub fn exists(&self) -> bool {
        !self.creator.is_zero()
    }

    /// Display status.
    pub const fn status(&self) -> CampaignStatus {
        CampaignStatus::from_flags(self.active, self.completed, self.withdrawn)
    }

    /// Percentage of the goal raised, two decimals.
    pub fn percentage(&self) -> String {
        calculate_percentage(self.funds_raised, self.goal)
    }

    /// Progress bar width in percent, capped at 100.
    pub fn progress(&self) -> u8 {
        progress_width(self.funds_raised, self.goal)
    }

    /// Whether `account` created this campaign.
    pub fn is_creator(&self, account: Option<Address>) -> bool {
        account.is_some_and(|account| self.exists() && account == self.creator)
    }

    /// Whether anyone may contribute.
    pub const fn can_contribute(&self) -> bool {
        self.active && !self.completed
    }

    /// Whether `account` may withdraw the raised funds.
    pub fn can_withdraw(&self, account: Option<Address>) -> bool {
        self.is_creator(account) && self.completed && !self.withdrawn
    }
}

/// A KYC record as read from the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRecord {
    /// Full name.
    pub name: String,
    /// 13-digit national identity number.
    pub cnic: String,
    /// Approved by the admin.
    pub approved: bool,
    /// A submission exists for the address.
    pub exists: bool,
}

impl KycRecord {
    /// Display status.
    pub const fn status(&self) -> KycStatus {
        KycStatus::from_flags(self.exists, self.approved)
    }

    /// Whether the record awaits review.
    pub const fn is_pending(&self) -> bool {
        self.exists && !self.approved
    }
}

impl From<IKycRegistry::kycRequestsReturn> for KycRecord {
    fn from(record: IKycRegistry::kycRequestsReturn) -> Self {
        Self { name: record.name, cnic: record.cnic, approved: record.approved, exists: record.exists }
    }
}

/// A KYC submission awaiting the admin's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingKyc {
    /// Submitting address.
    pub address: Address,
    /// The submitted record.
    pub record: KycRecord,
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use rstest::rstest;

    use super::*;

    const CREATOR: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    fn campaign(active: bool, completed: bool, withdrawn: bool) -> Campaign {
        Campaign {
            id: 1,
            title: "Solar pumps".into(),
            description: "Irrigation for the valley".into(),
            goal: ether(10),
            funds_raised: ether(10),
            creator: CREATOR,
            active,
            completed,
            withdrawn,
        }
    }

    #[test]
    fn test_from_record() {
        let record = ICrowdfunding::campaignsReturn {
            title: "t".into(),
            description: "d".into(),
            goal: ether(10),
            fundsRaised: ether(5) / U256::from(2),
            creator: CREATOR,
            active: true,
            completed: false,
            withdrawn: false,
        };
        let campaign = Campaign::from_record(3, record);
        assert_eq!(campaign.id, 3);
        assert_eq!(campaign.percentage(), "25.00");
        assert_eq!(campaign.progress(), 25);
        assert_eq!(campaign.status(), CampaignStatus::Active);
    }

    #[test]
    fn test_zero_creator_does_not_exist() {
        let campaign = Campaign { creator: Address::ZERO, ..campaign(false, false, false) };
        assert!(!campaign.exists());
        assert!(!campaign.is_creator(Some(Address::ZERO)));
    }

    #[test]
    fn test_is_creator_ignores_case() {
        let lower: Address = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap();
        let upper: Address = "0x70997970C51812DC3A010C7D01B50E0D17DC79C8".parse().unwrap();
        let campaign = campaign(false, true, false);
        assert!(campaign.is_creator(Some(lower)));
        assert!(campaign.is_creator(Some(upper)));
        assert!(!campaign.is_creator(None));
    }

    #[rstest]
    #[case(Some(CREATOR), false, true, false, true)]
    #[case(Some(CREATOR), false, true, true, false)]
    #[case(Some(CREATOR), true, false, false, false)]
    #[case(Some(Address::repeat_byte(1)), false, true, false, false)]
    #[case(None, false, true, false, false)]
    fn test_can_withdraw(
        #[case] account: Option<Address>,
        #[case] active: bool,
        #[case] completed: bool,
        #[case] withdrawn: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(campaign(active, completed, withdrawn).can_withdraw(account), expected);
    }

    #[rstest]
    #[case(true, false, true)]
    #[case(true, true, false)]
    #[case(false, false, false)]
    fn test_can_contribute(#[case] active: bool, #[case] completed: bool, #[case] expected: bool) {
        assert_eq!(campaign(active, completed, false).can_contribute(), expected);
    }

    #[test]
    fn test_kyc_record_status() {
        assert_eq!(KycRecord::default().status(), KycStatus::NotSubmitted);
        let pending = KycRecord { exists: true, ..Default::default() };
        assert!(pending.is_pending());
        assert_eq!(pending.status(), KycStatus::Pending);
        let approved = KycRecord { approved: true, ..pending };
        assert!(!approved.is_pending());
        assert_eq!(approved.status(), KycStatus::Approved);
    }
}
