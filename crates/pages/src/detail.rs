//! Campaign detail page: contribute and withdraw.

use std::fmt;

use alloy_primitives::{Address, U256};
use crowdfund_contracts::Campaign;
use crowdfund_format::{format_display, parse_ether};
use crowdfund_provider::WalletProvider;
use crowdfund_session::{Session, WalletContext};

use crate::{
    Notice, Outcome, PageError, ValidationError,
    components::{Modal, Spinner, SpinnerSize, progress_bar},
    write::confirm,
};

/// What the connected account may do with the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailActions {
    /// The account created the campaign.
    pub is_creator: bool,
    /// Contributions are accepted.
    pub can_contribute: bool,
    /// The account may withdraw the funds.
    pub can_withdraw: bool,
    /// Why nothing is offered, when that is the case.
    pub explanation: Option<&'static str>,
}

impl DetailActions {
    /// Affordances of `campaign` for `account`.
    pub fn for_account(campaign: &Campaign, account: Option<Address>) -> Self {
        let is_creator = campaign.is_creator(account);
        let can_contribute = campaign.can_contribute();
        let can_withdraw = campaign.can_withdraw(account);
        let explanation = if can_contribute || can_withdraw {
            None
        } else if campaign.withdrawn {
            Some("Funds have been withdrawn")
        } else if campaign.completed && !is_creator {
            Some("Campaign goal reached - only creator can withdraw")
        } else if !campaign.active && !campaign.completed {
            Some("Campaign is not active")
        } else {
            None
        };
        Self { is_creator, can_contribute, can_withdraw, explanation }
    }
}

/// One campaign with its contribute and withdraw affordances.
#[derive(Debug, Clone)]
pub struct CampaignDetailPage {
    id: u64,
    campaign: Option<Campaign>,
    loading: bool,
    contribute_modal: Modal,
    symbol: String,
}

impl CampaignDetailPage {
    /// Page for campaign `id`, amounts in `symbol`.
    pub fn new(id: u64, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        let modal = Modal::new("Contribute to Campaign")
            .with_body(format!("Contribution Amount ({symbol})"));
        Self { id, campaign: None, loading: true, contribute_modal: modal, symbol }
    }

    /// Campaign id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The loaded campaign; `None` when it does not exist.
    pub const fn campaign(&self) -> Option<&Campaign> {
        self.campaign.as_ref()
    }

    /// Reads the campaign. A never-created id loads as not found.
    pub async fn load<P>(&mut self, session: &Session<P>) -> Result<(), PageError>
    where
        P: WalletProvider + Clone,
    {
        let contracts = session.contracts.as_ref().ok_or(PageError::NotConnected)?;
        self.loading = true;
        let result = contracts.crowdfunding.find_campaign(self.id).await;
        self.loading = false;
        match result {
            Ok(campaign) => {
                self.campaign = campaign;
                Ok(())
            }
            Err(err) => {
                self.campaign = None;
                Err(PageError::FetchCampaign(err))
            }
        }
    }

    /// Affordances for `account`, once the campaign is loaded.
    pub fn actions(&self, account: Option<Address>) -> Option<DetailActions> {
        self.campaign.as_ref().map(|campaign| DetailActions::for_account(campaign, account))
    }

    /// Shows the contribution dialog.
    pub fn open_contribute(&mut self) {
        self.contribute_modal.open();
    }

    /// Hides the contribution dialog.
    pub fn close_contribute(&mut self) {
        self.contribute_modal.close();
    }

    /// Whether the contribution dialog is shown.
    pub const fn is_contribute_open(&self) -> bool {
        self.contribute_modal.is_open()
    }

    /// Contributes `amount` display units to the campaign.
    pub async fn contribute<P>(&mut self, context: &mut WalletContext<P>, amount: &str) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        let value = match self.check_contribution(context.session(), amount) {
            Ok(value) => value,
            Err(err) => return Outcome::failed(err.to_string()),
        };
        let Some(contracts) = context.session().contracts.clone() else {
            return Outcome::failed(ValidationError::NotConnected.to_string());
        };

        let mut outcome = Outcome::default();
        let submitted = contracts.crowdfunding.contribute(self.id, value).await;
        let message = "Transaction submitted. Processing contribution...";
        if confirm(submitted, message, &mut outcome).await.is_none() {
            return outcome;
        }
        let amount = amount.trim();
        outcome.push(Notice::success(format!("Successfully contributed {amount} {}!", self.symbol)));
        self.close_contribute();
        self.reload(context).await;
        outcome
    }

    fn check_contribution<P>(
        &self,
        session: &Session<P>,
        amount: &str,
    ) -> Result<U256, ValidationError> {
        if !session.is_connected() {
            return Err(ValidationError::NotConnected);
        }
        let value = parse_ether(amount).map_err(|_| ValidationError::InvalidContribution)?;
        if value.is_zero() {
            return Err(ValidationError::InvalidContribution);
        }
        if self.campaign.as_ref().is_some_and(|campaign| !campaign.can_contribute()) {
            return Err(ValidationError::ContributionsClosed);
        }
        Ok(value)
    }

    /// Withdraws the raised funds to the creator.
    pub async fn withdraw<P>(&mut self, context: &mut WalletContext<P>) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        let session = context.session();
        let Some(contracts) = session.contracts.clone().filter(|_| session.is_connected()) else {
            return Outcome::failed(ValidationError::NotConnected.to_string());
        };
        if self.campaign.as_ref().is_some_and(|c| !c.can_withdraw(session.account)) {
            return Outcome::failed(ValidationError::WithdrawNotAllowed.to_string());
        }

        let mut outcome = Outcome::default();
        let submitted = contracts.crowdfunding.withdraw(self.id).await;
        let message = "Transaction submitted. Processing withdrawal...";
        if confirm(submitted, message, &mut outcome).await.is_none() {
            return outcome;
        }
        outcome.push(Notice::success("Funds withdrawn successfully!"));
        self.reload(context).await;
        outcome
    }

    async fn reload<P>(&mut self, context: &mut WalletContext<P>)
    where
        P: WalletProvider + Clone,
    {
        context.refresh().await;
        if let Err(err) = self.load(context.session()).await {
            tracing::warn!(id = self.id, error = %err, "failed to re-read campaign");
        }
    }

    /// Renders the page for `account`.
    pub fn render(&self, account: Option<Address>) -> String {
        DetailView { page: self, account }.to_string()
    }
}

struct DetailView<'a> {
    page: &'a CampaignDetailPage,
    account: Option<Address>,
}

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.page;
        if page.loading {
            return write!(f, "{}", Spinner::new(SpinnerSize::Lg, "Loading campaign..."));
        }
        let Some(c) = &page.campaign else {
            return f.write_str("Campaign not found or invalid.");
        };
        let actions = DetailActions::for_account(c, self.account);
        let sym = &page.symbol;

        writeln!(f, "{}  [{}]", c.title, c.status().label())?;
        if actions.is_creator {
            writeln!(f, "You created this campaign")?;
        }
        writeln!(f, "Funding Progress {} {}%", progress_bar(c.progress()), c.percentage())?;
        writeln!(f, "Raised: {} {sym}", format_display(c.funds_raised))?;
        writeln!(f, "Goal: {} {sym}", format_display(c.goal))?;
        writeln!(f, "\nAbout This Campaign\n{}", c.description)?;
        writeln!(f, "\nCampaign Creator\n{}", c.creator)?;

        if actions.can_contribute {
            writeln!(f, "\n> Contribute to Campaign")?;
        }
        if actions.can_withdraw {
            writeln!(f, "\n> Withdraw Funds")?;
        }
        if let Some(explanation) = actions.explanation {
            writeln!(f, "\n{explanation}")?;
        }
        if page.contribute_modal.is_open() {
            writeln!(f, "\n{}", page.contribute_modal)?;
        }
        Ok(())
    }
}
