//! Campaign creation page.

use std::fmt;

use alloy_primitives::U256;
use crowdfund_format::{UnitsError, parse_ether};
use crowdfund_provider::WalletProvider;
use crowdfund_session::{Session, WalletContext};

use crate::{Notice, Outcome, Route, ValidationError, write::confirm};

/// Values entered in the campaign form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCampaignForm {
    /// Campaign title.
    pub title: String,
    /// Campaign description.
    pub description: String,
    /// Funding goal in display units.
    pub goal: String,
}

impl CreateCampaignForm {
    /// Checks the fields and converts the goal to base units.
    pub fn validate(&self) -> Result<U256, ValidationError> {
        let goal = self.goal.trim();
        if self.title.trim().is_empty() || self.description.trim().is_empty() || goal.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let goal = parse_ether(goal).map_err(|err| match err {
            UnitsError::Negative(_) => ValidationError::NonPositiveGoal,
            UnitsError::Empty => ValidationError::MissingFields,
            UnitsError::Invalid { .. } => ValidationError::InvalidGoal,
        })?;
        if goal.is_zero() {
            return Err(ValidationError::NonPositiveGoal);
        }
        Ok(goal)
    }
}

/// Whether the form may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateGate {
    /// No wallet is connected.
    NotConnected,
    /// The account must pass KYC first.
    KycRequired,
    /// The form is available.
    Ready,
}

impl CreateGate {
    /// Gate for `session`. Admins need no KYC.
    pub const fn for_session<P>(session: &Session<P>) -> Self {
        if session.account.is_none() {
            Self::NotConnected
        } else if !session.can_create() {
            Self::KycRequired
        } else {
            Self::Ready
        }
    }
}

/// The campaign form.
#[derive(Debug, Clone, Default)]
pub struct CreateCampaignPage {
    /// Current form values.
    pub form: CreateCampaignForm,
}

impl CreateCampaignPage {
    /// Page with `form` filled in.
    pub const fn new(form: CreateCampaignForm) -> Self {
        Self { form }
    }

    /// Creates the campaign described by the form.
    ///
    /// Unverified non-admin accounts are redirected to the KYC page without any
    /// contract call. On success the form is cleared and the outcome redirects to
    /// the campaign list.
    pub async fn submit<P>(&mut self, context: &mut WalletContext<P>) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        let session = context.session();
        let contracts = match (CreateGate::for_session(session), &session.contracts) {
            (CreateGate::NotConnected, _) | (CreateGate::Ready, None) => {
                return Outcome::failed(ValidationError::NotConnected.to_string());
            }
            (CreateGate::KycRequired, _) => {
                return Outcome::failed(ValidationError::KycRequired.to_string())
                    .redirect_to(Route::Kyc);
            }
            (CreateGate::Ready, Some(contracts)) => contracts.clone(),
        };
        let goal = match self.form.validate() {
            Ok(goal) => goal,
            Err(err) => return Outcome::failed(err.to_string()),
        };

        let mut outcome = Outcome::default();
        let submitted = contracts
            .crowdfunding
            .create_campaign(self.form.title.trim(), self.form.description.trim(), goal)
            .await;
        let message = "Transaction submitted. Creating campaign...";
        if confirm(submitted, message, &mut outcome).await.is_none() {
            return outcome;
        }
        outcome.push(Notice::success("Campaign created successfully!"));
        self.form = CreateCampaignForm::default();
        context.refresh().await;
        outcome.redirect_to(Route::Campaigns)
    }

    /// Renders the page for `session`.
    pub fn render<P>(&self, session: &Session<P>) -> String {
        CreateView { page: self, gate: CreateGate::for_session(session) }.to_string()
    }
}

struct CreateView<'a> {
    page: &'a CreateCampaignPage,
    gate: CreateGate,
}

impl fmt::Display for CreateView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gate {
            CreateGate::NotConnected => {
                writeln!(f, "Wallet Not Connected")?;
                write!(f, "Please connect your wallet to create a campaign")
            }
            CreateGate::KycRequired => {
                writeln!(f, "KYC Verification Required")?;
                writeln!(f, "You need to complete KYC verification to create campaigns")?;
                write!(f, "> Go to KYC ({})", Route::Kyc)
            }
            CreateGate::Ready => {
                let form = &self.page.form;
                writeln!(f, "Create New Campaign")?;
                writeln!(f, "Launch your crowdfunding campaign and bring your idea to life")?;
                writeln!(f, "Title: {}", form.title)?;
                writeln!(f, "Description: {}", form.description)?;
                writeln!(f, "Goal: {}", form.goal)?;
                writeln!(f, "  - Campaign becomes active immediately after creation")?;
                writeln!(f, "  - Anyone can contribute to your campaign")?;
                writeln!(f, "  - You can withdraw funds only after reaching the goal")?;
                write!(f, "  - Campaign status updates automatically when goal is reached")
            }
        }
    }
}
