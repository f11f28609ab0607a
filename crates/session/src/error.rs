//! Session errors.

use crowdfund_contracts::ContractError;
use crowdfund_format::ErrorKind;
use crowdfund_provider::ProviderError;
use thiserror::Error;

/// Errors that can occur while managing the wallet session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No wallet provider is attached.
    #[error("Please install a wallet provider to use this app")]
    NoProvider,

    /// An operation needs a connected account.
    #[error("Please connect your wallet first")]
    NotConnected,

    /// The provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A contract read failed.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The wallet refused to switch to the configured chain.
    #[error("Failed to switch network")]
    SwitchNetwork(#[source] ProviderError),

    /// The wallet refused to add the configured chain.
    #[error("Failed to add network")]
    AddNetwork(#[source] ProviderError),
}

impl SessionError {
    /// Classifies the error for display.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider(err) | Self::SwitchNetwork(err) | Self::AddNetwork(err) => err.kind(),
            Self::Contract(err) => err.kind(),
            Self::NoProvider | Self::NotConnected => ErrorKind::Unknown,
        }
    }

    /// Message shown to the user when the operation fails.
    ///
    /// Failures with a local cause keep their own wording; provider faults use the
    /// shared translation.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoProvider | Self::NotConnected => self.to_string(),
            Self::SwitchNetwork(_) | Self::AddNetwork(_) => match self.kind() {
                ErrorKind::Unknown => self.to_string(),
                kind => kind.user_message().to_string(),
            },
            Self::Provider(_) | Self::Contract(_) => self.kind().user_message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SessionError::NoProvider, "Please install a wallet provider to use this app")]
    #[case(SessionError::NotConnected, "Please connect your wallet first")]
    #[case(SessionError::Provider(ProviderError::UserRejected), "Transaction was cancelled by user")]
    #[case(SessionError::Provider(ProviderError::NoAccounts), "An unknown error occurred")]
    #[case(
        SessionError::SwitchNetwork(ProviderError::Transport("timeout".into())),
        "Failed to switch network"
    )]
    #[case(SessionError::AddNetwork(ProviderError::UserRejected), "Transaction was cancelled by user")]
    fn test_user_message(#[case] err: SessionError, #[case] expected: &str) {
        assert_eq!(err.user_message(), expected);
    }

    #[test]
    fn test_kind_follows_provider() {
        let err = SessionError::from(ProviderError::Rpc {
            code: 3,
            message: "execution reverted: Only owner".into(),
        });
        assert_eq!(err.kind(), ErrorKind::ExecutionReverted);
    }
}
