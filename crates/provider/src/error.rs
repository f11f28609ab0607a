//! Provider error types following EIP-1193 and JSON-RPC code conventions.

use alloy_primitives::B256;
use crowdfund_format::{ErrorKind, translate_error};
use thiserror::Error;

/// Error codes a wallet provider may report.
pub mod codes {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested method or account has not been authorized.
    pub const UNAUTHORIZED: i64 = 4100;
    /// The provider does not support the method.
    pub const UNSUPPORTED_METHOD: i64 = 4200;
    /// The provider is disconnected from all chains.
    pub const DISCONNECTED: i64 = 4900;
    /// The chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    /// The method does not exist / is not available.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i64 = -32603;
    /// Generic server error, used by nodes for failed transactions.
    pub const SERVER_ERROR: i64 = -32000;
    /// Execution reverted during `eth_call` or `eth_estimateGas`.
    pub const EXECUTION_ERROR: i64 = 3;
}

/// Errors that can occur while talking to a wallet provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No wallet provider is attached.
    #[error("no wallet provider available")]
    NoProvider,

    /// The user declined the request.
    #[error("user rejected the request")]
    UserRejected,

    /// The provider returned no accounts.
    #[error("no accounts found")]
    NoAccounts,

    /// The provider answered with a JSON-RPC error.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// Error code.
        code: i64,
        /// Error message.
        message: String,
    },

    /// The request never reached the provider or the response was unreadable.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The transaction was included but reverted.
    #[error("execution reverted in transaction {0}")]
    Reverted(B256),

    /// Signing the transaction failed.
    #[error("signing failed: {0}")]
    Signer(String),
}

impl ProviderError {
    /// Builds an error from a JSON-RPC error object, recognizing user rejection.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        if code == codes::USER_REJECTED {
            return Self::UserRejected;
        }
        Self::Rpc { code, message: message.into() }
    }

    /// JSON-RPC code carried by this error, if any.
    pub const fn code(&self) -> Option<i64> {
        match self {
            Self::UserRejected => Some(codes::USER_REJECTED),
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classifies the error for display.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserRejected => ErrorKind::UserRejected,
            Self::Reverted(_) => ErrorKind::ExecutionReverted,
            Self::Rpc { code, message } => translate_error(Some(*code), message),
            Self::Transport(message) | Self::Decode(message) | Self::Signer(message) => {
                translate_error(None, message)
            }
            Self::NoProvider | Self::NoAccounts => ErrorKind::Unknown,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_from_rpc_user_rejected() {
        let err = ProviderError::from_rpc(4001, "User rejected the request.");
        assert!(matches!(err, ProviderError::UserRejected));
        assert_eq!(err.code(), Some(codes::USER_REJECTED));
    }

    #[test]
    fn test_from_rpc_keeps_other_codes() {
        let err = ProviderError::from_rpc(codes::UNRECOGNIZED_CHAIN, "Unrecognized chain ID");
        assert_eq!(err.code(), Some(4902));
        assert_eq!(err.to_string(), "rpc error 4902: Unrecognized chain ID");
    }

    #[rstest]
    #[case(ProviderError::UserRejected, ErrorKind::UserRejected)]
    #[case(ProviderError::Reverted(B256::ZERO), ErrorKind::ExecutionReverted)]
    #[case(
        ProviderError::Rpc { code: 3, message: "execution reverted: Campaign not active".into() },
        ErrorKind::ExecutionReverted
    )]
    #[case(
        ProviderError::Rpc {
            code: -32003,
            message: "insufficient funds for gas * price + value".into(),
        },
        ErrorKind::InsufficientFunds
    )]
    #[case(ProviderError::Transport("connection refused".into()), ErrorKind::Unknown)]
    #[case(ProviderError::NoProvider, ErrorKind::Unknown)]
    fn test_kind(#[case] err: ProviderError, #[case] expected: ErrorKind) {
        assert_eq!(err.kind(), expected);
    }

    #[test]
    fn test_provider_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProviderError>();
    }
}
