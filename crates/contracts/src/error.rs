//! Contract call errors.

use crowdfund_format::ErrorKind;
use crowdfund_provider::ProviderError;

/// Errors that can occur when calling a contract.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// The provider failed or the contract rejected the call.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The return data did not match the expected ABI.
    #[error("failed to decode {method} result: {reason}")]
    Decode {
        /// Solidity signature of the called function.
        method: &'static str,
        /// Decoder message.
        reason: String,
    },
}

impl ContractError {
    /// Classifies the error for display.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Provider(err) => err.kind(),
            Self::Decode { .. } => ErrorKind::Unknown,
        }
    }
}
