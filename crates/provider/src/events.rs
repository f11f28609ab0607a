//! Notifications emitted by a wallet provider, and the fan-out that carries them.

use std::sync::Arc;

use alloy_primitives::Address;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use parking_lot::Mutex;

/// A change reported by the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    /// The authorized account list changed; the first entry is the primary account.
    AccountsChanged(Vec<Address>),
    /// The wallet switched to another chain.
    ChainChanged(u64),
}

/// Registry of wallet event subscribers.
pub type WalletEvents = Broadcast<WalletEvent>;

/// Fans cloned values out to every live subscriber and remembers the latest one.
///
/// Clones share the same subscriber list.
#[derive(Debug)]
pub struct Broadcast<T> {
    shared: Arc<Mutex<Shared<T>>>,
}

#[derive(Debug)]
struct Shared<T> {
    listeners: Vec<UnboundedSender<T>>,
    latest: Option<T>,
}

impl<T: Clone> Broadcast<T> {
    /// Registry without subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self { shared: Arc::new(Mutex::new(Shared { listeners: Vec::new(), latest: None })) }
    }

    /// Sends `value` to every subscriber, dropping closed channels.
    pub fn publish(&self, value: T) {
        let mut shared = self.shared.lock();
        shared.listeners.retain(|sender| sender.unbounded_send(value.clone()).is_ok());
        shared.latest = Some(value);
    }

    /// Receives every value published from now on.
    pub fn subscribe(&self) -> UnboundedReceiver<T> {
        let (sender, receiver) = unbounded();
        self.shared.lock().listeners.push(sender);
        receiver
    }

    /// The most recently published value, whether or not anyone received it.
    pub fn latest(&self) -> Option<T> {
        self.shared.lock().latest.clone()
    }

    /// Number of live subscribers as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().listeners.len()
    }
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<T: Clone> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}
