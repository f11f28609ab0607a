//! Campaign list.

use std::{fmt, str::FromStr};

use crowdfund_contracts::Campaign;
use crowdfund_provider::WalletProvider;
use crowdfund_session::Session;
use serde::{Deserialize, Serialize};

use crate::{
    PageError,
    components::{CampaignCard, Spinner, SpinnerSize},
};

/// Which campaigns the list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignFilter {
    /// Every campaign.
    #[default]
    All,
    /// Campaigns accepting contributions.
    Active,
    /// Funded campaigns whose funds are still held.
    Completed,
    /// Campaigns whose funds were withdrawn.
    Withdrawn,
}

impl CampaignFilter {
    /// Every filter, in tab order.
    pub const ALL: [Self; 4] = [Self::All, Self::Active, Self::Completed, Self::Withdrawn];

    /// Whether `campaign` passes the filter.
    pub const fn matches(&self, campaign: &Campaign) -> bool {
        match self {
            Self::All => true,
            Self::Active => campaign.active,
            Self::Completed => campaign.completed && !campaign.withdrawn,
            Self::Withdrawn => campaign.withdrawn,
        }
    }

    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Tab label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::All => "All Campaigns",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Withdrawn => "Withdrawn",
        }
    }
}

impl fmt::Display for CampaignFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown campaign filter {0:?}, expected one of: all, active, completed, withdrawn")]
pub struct ParseFilterError(String);

impl FromStr for CampaignFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}

/// Every campaign, newest first.
#[derive(Debug, Clone, Default)]
pub struct CampaignsPage {
    campaigns: Vec<Campaign>,
    filter: CampaignFilter,
    loading: bool,
    symbol: String,
}

impl CampaignsPage {
    /// Empty list showing amounts in `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { campaigns: Vec::new(), filter: CampaignFilter::All, loading: true, symbol: symbol.into() }
    }

    /// Reads every campaign through the session's contracts.
    ///
    /// On failure the previously loaded list is kept.
    pub async fn load<P>(&mut self, session: &Session<P>) -> Result<(), PageError>
    where
        P: WalletProvider + Clone,
    {
        let contracts = session.contracts.as_ref().ok_or(PageError::NotConnected)?;
        self.loading = true;
        let result = contracts.crowdfunding.campaigns().await;
        self.loading = false;
        self.campaigns = result.map_err(PageError::FetchCampaigns)?;
        Ok(())
    }

    /// Changes the filter.
    pub const fn set_filter(&mut self, filter: CampaignFilter) {
        self.filter = filter;
    }

    /// Current filter.
    pub const fn filter(&self) -> CampaignFilter {
        self.filter
    }

    /// Every loaded campaign.
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Campaigns passing the filter.
    pub fn visible(&self) -> Vec<&Campaign> {
        self.campaigns.iter().filter(|c| self.filter.matches(c)).collect()
    }

    /// Text shown when no campaign passes the filter.
    pub fn empty_message(&self) -> String {
        match self.filter {
            CampaignFilter::All => {
                "No campaigns have been created yet. Be the first to create one!".to_string()
            }
            filter => format!("No {filter} campaigns at the moment."),
        }
    }
}

impl fmt::Display for CampaignsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Browse Campaigns")?;
        writeln!(f, "Discover and support amazing projects on the blockchain")?;
        let tabs: Vec<String> = CampaignFilter::ALL
            .iter()
            .map(|filter| {
                if *filter == self.filter {
                    format!("*{}*", filter.label())
                } else {
                    filter.label().to_string()
                }
            })
            .collect();
        writeln!(f, "{}", tabs.join(" | "))?;

        if self.loading {
            return write!(f, "{}", Spinner::new(SpinnerSize::Lg, "Loading campaigns..."));
        }

        let visible = self.visible();
        let plural = if visible.len() == 1 { "" } else { "s" };
        writeln!(f, "Showing {} campaign{plural}", visible.len())?;
        if visible.is_empty() {
            writeln!(f, "No Campaigns Found")?;
            return write!(f, "{}", self.empty_message());
        }
        for (i, campaign) in visible.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", CampaignCard::new(campaign, &self.symbol))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};
    use rstest::rstest;

    use super::*;

    fn campaign(id: u64, active: bool, completed: bool, withdrawn: bool) -> Campaign {
        Campaign {
            id,
            title: format!("Campaign {id}"),
            description: "desc".into(),
            goal: U256::from(10),
            funds_raised: U256::ZERO,
            creator: Address::repeat_byte(0x11),
            active,
            completed,
            withdrawn,
        }
    }

    fn page() -> CampaignsPage {
        CampaignsPage {
            campaigns: vec![
                campaign(4, false, true, true),
                campaign(3, false, true, false),
                campaign(2, false, false, false),
                campaign(1, true, false, false),
            ],
            filter: CampaignFilter::All,
            loading: false,
            symbol: "ETH".into(),
        }
    }

    #[rstest]
    #[case(CampaignFilter::All, vec![4, 3, 2, 1])]
    #[case(CampaignFilter::Active, vec![1])]
    #[case(CampaignFilter::Completed, vec![3])]
    #[case(CampaignFilter::Withdrawn, vec![4])]
    fn test_filter(#[case] filter: CampaignFilter, #[case] expected: Vec<u64>) {
        let mut page = page();
        page.set_filter(filter);
        let ids: Vec<u64> = page.visible().iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    #[case("all", CampaignFilter::All)]
    #[case("Active", CampaignFilter::Active)]
    #[case(" completed ", CampaignFilter::Completed)]
    #[case("WITHDRAWN", CampaignFilter::Withdrawn)]
    fn test_parse_filter(#[case] input: &str, #[case] expected: CampaignFilter) {
        assert_eq!(input.parse::<CampaignFilter>(), Ok(expected));
    }

    #[test]
    fn test_parse_unknown_filter() {
        assert!("pending".parse::<CampaignFilter>().is_err());
    }

    #[test]
    fn test_empty_messages() {
        let mut page = CampaignsPage::new("ETH");
        assert_eq!(
            page.empty_message(),
            "No campaigns have been created yet. Be the first to create one!"
        );
        page.set_filter(CampaignFilter::Withdrawn);
        assert_eq!(page.empty_message(), "No withdrawn campaigns at the moment.");
    }

    #[test]
    fn test_render_counts_visible() {
        let mut page = page();
        page.set_filter(CampaignFilter::Active);
        let rendered = page.to_string();
        assert!(rendered.contains("*Active*"));
        assert!(rendered.contains("Showing 1 campaign\n"));
        assert!(rendered.contains("#1 Campaign 1  [Active]"));
    }

    #[test]
    fn test_render_while_loading() {
        let rendered = CampaignsPage::new("ETH").to_string();
        assert!(rendered.ends_with("(...) Loading campaigns..."));
    }
}
