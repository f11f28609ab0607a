//! Admin dashboard: review pending KYC submissions.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use alloy_primitives::Address;
use crowdfund_contracts::{Contracts, PendingKyc};
use crowdfund_format::truncate_address;
use crowdfund_provider::{PendingTransaction, WalletProvider};
use crowdfund_session::{Session, WalletContext};

use crate::{
    Notice, Outcome, PageError, ValidationError,
    components::{Spinner, SpinnerSize},
    write::{accept, settle},
};

/// Whether the dashboard may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAccess {
    /// No wallet is connected.
    NotConnected,
    /// The account is not the admin.
    Denied,
    /// The account is the admin.
    Granted,
}

impl AdminAccess {
    /// Access for `session`.
    pub const fn for_session<P>(session: &Session<P>) -> Self {
        if session.account.is_none() {
            Self::NotConnected
        } else if !session.is_admin {
            Self::Denied
        } else {
            Self::Granted
        }
    }

    const fn heading(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::NotConnected => {
                Some(("Wallet Not Connected", "Please connect your wallet to access the admin panel"))
            }
            Self::Denied => {
                Some(("Access Denied", "You don't have admin privileges to access this page"))
            }
            Self::Granted => None,
        }
    }
}

/// A decision in flight for one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Processing {
    /// Approval submitted.
    Approving,
    /// Rejection submitted.
    Rejecting,
}

impl Processing {
    const fn label(&self) -> &'static str {
        match self {
            Self::Approving => "Approving...",
            Self::Rejecting => "Rejecting...",
        }
    }
}

/// A KYC decision sent to the chain and not yet confirmed.
#[must_use = "the address stays marked as processing until the decision is finished"]
#[derive(Debug)]
pub struct PendingDecision<P> {
    user: Address,
    decision: Processing,
    transaction: PendingTransaction<P>,
    outcome: Outcome,
}

impl<P> PendingDecision<P> {
    /// Address the decision is about.
    pub const fn user(&self) -> Address {
        self.user
    }

    /// Notices recorded while submitting.
    pub const fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

/// Pending KYC submissions and the decisions in flight.
#[derive(Debug, Clone, Default)]
pub struct AdminPage {
    pending: Vec<PendingKyc>,
    processing: HashMap<Address, Processing>,
    loading: bool,
}

impl AdminPage {
    /// Empty dashboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submissions awaiting a decision, in request order.
    pub fn pending(&self) -> &[PendingKyc] {
        &self.pending
    }

    /// Decision in flight for `address`.
    pub fn processing(&self, address: Address) -> Option<Processing> {
        self.processing.get(&address).copied()
    }

    /// Whether any decision is in flight.
    pub fn is_processing(&self) -> bool {
        !self.processing.is_empty()
    }

    /// Rebuilds the pending list from the registry's request log.
    ///
    /// Each requesting address appears once, at its first request. Records that
    /// were approved or removed since are skipped. On failure the previous list is
    /// kept.
    pub async fn load<P>(&mut self, session: &Session<P>) -> Result<(), PageError>
    where
        P: WalletProvider + Clone,
    {
        match AdminAccess::for_session(session) {
            AdminAccess::NotConnected => return Err(PageError::NotConnected),
            AdminAccess::Denied => return Err(PageError::AccessDenied),
            AdminAccess::Granted => {}
        }
        let contracts = session.contracts.as_ref().ok_or(PageError::NotConnected)?;
        self.loading = true;
        let result = Self::fetch_pending(contracts).await;
        self.loading = false;
        let pending = result.map_err(PageError::FetchPendingKyc)?;
        tracing::debug!(count = pending.len(), "loaded pending KYC requests");
        self.pending = pending;
        Ok(())
    }

    async fn fetch_pending<P>(
        contracts: &Contracts<P>,
    ) -> Result<Vec<PendingKyc>, crowdfund_contracts::ContractError>
    where
        P: WalletProvider + Clone,
    {
        let mut seen = HashSet::new();
        let mut pending = Vec::new();
        for address in contracts.kyc.requested_users().await? {
            if !seen.insert(address) {
                continue;
            }
            let record = contracts.kyc.kyc_request(address).await?;
            if record.is_pending() {
                pending.push(PendingKyc { address, record });
            }
        }
        Ok(pending)
    }

    /// Approves the submission of `user`.
    pub async fn approve<P>(&mut self, context: &mut WalletContext<P>, user: Address) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        self.decide(context, user, Processing::Approving).await
    }

    /// Rejects the submission of `user`, removing it from the registry.
    pub async fn reject<P>(&mut self, context: &mut WalletContext<P>, user: Address) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        self.decide(context, user, Processing::Rejecting).await
    }

    async fn decide<P>(
        &mut self,
        context: &mut WalletContext<P>,
        user: Address,
        decision: Processing,
    ) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        match self.submit(context, user, decision).await {
            Ok(pending) => self.finish(context, pending).await,
            Err(outcome) => outcome,
        }
    }

    /// Sends a decision on `user` without waiting for it to be mined.
    ///
    /// The address stays marked as processing until the returned decision is
    /// passed to [`AdminPage::finish`]. A second decision on a marked address is
    /// refused without sending anything.
    pub async fn submit<P>(
        &mut self,
        context: &WalletContext<P>,
        user: Address,
        decision: Processing,
    ) -> Result<PendingDecision<P>, Outcome>
    where
        P: WalletProvider + Clone,
    {
        let session = context.session();
        let contracts = match (AdminAccess::for_session(session), &session.contracts) {
            (AdminAccess::Granted, Some(contracts)) => contracts,
            (AdminAccess::Denied, _) => {
                return Err(Outcome::failed(ValidationError::NotAdmin.to_string()));
            }
            _ => return Err(Outcome::failed(ValidationError::NotConnected.to_string())),
        };
        if self.processing.contains_key(&user) {
            return Err(Outcome::failed(ValidationError::DecisionInProgress.to_string()));
        }

        let mut outcome = Outcome::default();
        let (submitted, message) = match decision {
            Processing::Approving => (
                contracts.kyc.approve_kyc(user).await,
                "Approval transaction submitted. Waiting for confirmation...",
            ),
            Processing::Rejecting => (
                contracts.kyc.reject_kyc(user).await,
                "Rejection transaction submitted. Waiting for confirmation...",
            ),
        };
        let Some(transaction) = accept(submitted, message, &mut outcome) else {
            return Err(outcome);
        };
        self.processing.insert(user, decision);
        Ok(PendingDecision { user, decision, transaction, outcome })
    }

    /// Waits for a submitted decision, then reloads the pending list.
    ///
    /// The returned outcome starts with the notices recorded while submitting. The
    /// processing marker is cleared whether or not the transaction succeeds.
    pub async fn finish<P>(
        &mut self,
        context: &WalletContext<P>,
        pending: PendingDecision<P>,
    ) -> Outcome
    where
        P: WalletProvider + Clone,
    {
        let PendingDecision { user, decision, transaction, mut outcome } = pending;
        if settle(transaction, &mut outcome).await.is_some() {
            let short = truncate_address(&user.to_checksum(None));
            outcome.push(Notice::success(match decision {
                Processing::Approving => format!("KYC approved for {short}"),
                Processing::Rejecting => format!("KYC rejected for {short}"),
            }));
            if let Err(err) = self.load(context.session()).await {
                tracing::warn!(error = %err, "failed to reload pending KYC requests");
                outcome.push(Notice::error(err.to_string()));
            }
        }
        self.processing.remove(&user);
        outcome
    }

    /// Renders the dashboard for `session`.
    pub fn render<P>(&self, session: &Session<P>) -> String {
        AdminView { page: self, access: AdminAccess::for_session(session) }.to_string()
    }
}

struct AdminView<'a> {
    page: &'a AdminPage,
    access: AdminAccess,
}

impl fmt::Display for AdminView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((title, message)) = self.access.heading() {
            writeln!(f, "{title}")?;
            return write!(f, "{message}");
        }
        writeln!(f, "Admin Dashboard")?;
        writeln!(f, "Manage KYC verification requests")?;
        if self.page.loading {
            return write!(f, "{}", Spinner::new(SpinnerSize::Lg, "Loading KYC requests..."));
        }
        if self.page.pending.is_empty() {
            writeln!(f, "No Pending Requests")?;
            return write!(f, "All KYC requests have been processed");
        }
        write!(f, "Pending KYC Requests ({})", self.page.pending.len())?;
        for entry in &self.page.pending {
            let controls = match self.page.processing(entry.address) {
                Some(processing) => processing.label().to_string(),
                None => "[Approve] [Reject]".to_string(),
            };
            write!(
                f,
                "\n{}  {}  CNIC {}  {}",
                truncate_address(&entry.address.to_checksum(None)),
                entry.record.name,
                entry.record.cnic,
                controls,
            )?;
        }
        Ok(())
    }
}
