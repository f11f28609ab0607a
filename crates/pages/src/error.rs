//! Page errors.

use crowdfund_contracts::ContractError;
use crowdfund_format::ErrorKind;
use thiserror::Error;

/// Input rejected before any provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No account is connected.
    #[error("Please connect your wallet first")]
    NotConnected,

    /// The account has not passed KYC.
    #[error("Please complete KYC verification first")]
    KycRequired,

    /// A required field is blank.
    #[error("Please fill in all fields")]
    MissingFields,

    /// The goal is zero or negative.
    #[error("Goal must be greater than 0")]
    NonPositiveGoal,

    /// The goal is not a number.
    #[error("Please enter a valid goal amount")]
    InvalidGoal,

    /// The contribution is missing, zero, negative or not a number.
    #[error("Please enter a valid contribution amount")]
    InvalidContribution,

    /// The national identity number is not 13 characters long.
    #[error("CNIC must be 13 digits")]
    CnicLength,

    /// The campaign does not accept contributions.
    #[error("Campaign is not accepting contributions")]
    ContributionsClosed,

    /// The account may not withdraw from the campaign.
    #[error("Only the creator can withdraw once the goal is reached")]
    WithdrawNotAllowed,

    /// The account is not the registry admin.
    #[error("You don't have admin privileges to access this page")]
    NotAdmin,

    /// A decision for the address is still waiting for confirmation.
    #[error("A decision for this address is already in progress")]
    DecisionInProgress,
}

/// Errors that can occur while loading a page.
#[derive(Debug, Error)]
pub enum PageError {
    /// The page needs a connected wallet.
    #[error("Please connect your wallet first")]
    NotConnected,

    /// The page is reserved for the registry admin.
    #[error("You don't have admin privileges to access this page")]
    AccessDenied,

    /// Reading campaigns failed.
    #[error("Failed to fetch campaigns")]
    FetchCampaigns(#[source] ContractError),

    /// Reading a campaign failed.
    #[error("Failed to fetch campaign")]
    FetchCampaign(#[source] ContractError),

    /// Reading pending KYC requests failed.
    #[error("Failed to fetch pending KYC requests")]
    FetchPendingKyc(#[source] ContractError),
}

impl PageError {
    /// Classifies the underlying fault.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FetchCampaigns(err) | Self::FetchCampaign(err) | Self::FetchPendingKyc(err) => {
                err.kind()
            }
            Self::NotConnected | Self::AccessDenied => ErrorKind::Unknown,
        }
    }
}
