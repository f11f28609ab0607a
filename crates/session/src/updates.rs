//! Lifecycle notifications published by the wallet context.

use alloy_primitives::Address;
use crowdfund_provider::Broadcast;

/// A change in the session lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionUpdate {
    /// A connection attempt started.
    Connecting,
    /// The session is connected.
    Connected {
        /// Connected account.
        account: Address,
        /// Chain the wallet is on.
        chain_id: u64,
    },
    /// A connection attempt failed; carries the message for the user.
    Failed(String),
    /// The session was cleared.
    Disconnected,
}

impl SessionUpdate {
    /// Whether a connection attempt is still unresolved.
    pub const fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }
}

/// Registry of session update subscribers.
pub type SessionUpdates = Broadcast<SessionUpdate>;
