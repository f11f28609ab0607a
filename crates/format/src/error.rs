//! Translation of provider and contract failures into user-facing messages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// EIP-1193 code for a request the user rejected.
pub const REJECTED_CODE: i64 = 4001;

/// Coarse classification of a failed provider or contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The signer declined the request.
    UserRejected,
    /// The account cannot cover value plus gas.
    InsufficientFunds,
    /// The contract rejected the call.
    ExecutionReverted,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Short message shown to the user.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::UserRejected => "Transaction was cancelled by user",
            Self::InsufficientFunds => "Insufficient funds for transaction",
            Self::ExecutionReverted => "Transaction failed - please check the requirements",
            Self::Unknown => "An unknown error occurred",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

/// Classifies a failure from its provider error code and message.
pub fn translate_error(code: Option<i64>, message: &str) -> ErrorKind {
    if code == Some(REJECTED_CODE)
        || message.contains("ACTION_REJECTED")
        || message.contains("user rejected")
        || message.contains("User denied")
    {
        return ErrorKind::UserRejected;
    }
    if message.contains("insufficient funds") {
        return ErrorKind::InsufficientFunds;
    }
    if message.contains("execution reverted") {
        return ErrorKind::ExecutionReverted;
    }
    tracing::debug!(?code, message, "unclassified provider error");
    ErrorKind::Unknown
}
