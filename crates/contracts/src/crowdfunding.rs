//! Typed handle for the crowdfunding contract.

use alloy_primitives::{Address, U256};
use crowdfund_provider::{PendingTransaction, WalletProvider};

use crate::{Campaign, Contract, ContractError, ICrowdfunding};

/// Most campaigns reserved up front when listing; the count is read from chain.
const MAX_PREALLOCATED: u64 = 256;

fn list_capacity(count: u64) -> usize {
    usize::try_from(count.min(MAX_PREALLOCATED)).unwrap_or_default()
}

/// The crowdfunding contract.
#[derive(Debug, Clone)]
pub struct Crowdfunding<P> {
    contract: Contract<P>,
}

impl<P: WalletProvider + Clone> Crowdfunding<P> {
    /// Wraps a contract handle.
    pub const fn new(contract: Contract<P>) -> Self {
        Self { contract }
    }

    /// Contract address.
    pub const fn address(&self) -> Address {
        self.contract.address()
    }

    /// Number of campaigns ever created; ids run from 1 to this value.
    pub async fn campaign_count(&self) -> Result<u64, ContractError> {
        let count = self.contract.read(ICrowdfunding::campaignCountCall {}).await?;
        Ok(count.saturating_to())
    }

    /// Raw record `id`, including never-created ids (zero creator).
    pub async fn campaign(&self, id: u64) -> Result<Campaign, ContractError> {
        let record = self.contract.read(ICrowdfunding::campaignsCall { id: U256::from(id) }).await?;
        Ok(Campaign::from_record(id, record))
    }

    /// Record `id`, or `None` when it was never created.
    pub async fn find_campaign(&self, id: u64) -> Result<Option<Campaign>, ContractError> {
        let campaign = self.campaign(id).await?;
        Ok(campaign.exists().then_some(campaign))
    }

    /// Every existing campaign, most recent first.
    pub async fn campaigns(&self) -> Result<Vec<Campaign>, ContractError> {
        let count = self.campaign_count().await?;
        let mut campaigns = Vec::with_capacity(list_capacity(count));
        for id in (1..=count).rev() {
            let campaign = self.campaign(id).await?;
            if campaign.exists() {
                campaigns.push(campaign);
            }
        }
        tracing::debug!(count, listed = campaigns.len(), "read campaigns");
        Ok(campaigns)
    }

    /// Opens a campaign with `goal` in base units.
    pub async fn create_campaign(
        &self,
        title: &str,
        description: &str,
        goal: U256,
    ) -> Result<PendingTransaction<P>, ContractError> {
        let call = ICrowdfunding::createCampaignCall {
            title: title.to_string(),
            description: description.to_string(),
            goal,
        };
        self.contract.write(call, None).await
    }

    /// Contributes `amount` base units to campaign `id`.
    pub async fn contribute(
        &self,
        id: u64,
        amount: U256,
    ) -> Result<PendingTransaction<P>, ContractError> {
        self.contract.write(ICrowdfunding::contributeCall { id: U256::from(id) }, Some(amount)).await
    }

    /// Withdraws the funds of campaign `id` to its creator.
    pub async fn withdraw(&self, id: u64) -> Result<PendingTransaction<P>, ContractError> {
        self.contract.write(ICrowdfunding::withdrawCall { id: U256::from(id) }, None).await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0)]
    #[case(3, 3)]
    #[case(u64::MAX, 256)]
    fn test_list_capacity_is_bounded(#[case] count: u64, #[case] expected: usize) {
        assert_eq!(list_capacity(count), expected);
    }
}
