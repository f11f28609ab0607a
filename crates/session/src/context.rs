//! The wallet context: owner of the session.

use alloy_primitives::Address;
use crowdfund_config::{AppConfig, ContractAddresses, NetworkConfig};
use crowdfund_contracts::{Contracts, TxOptions};
use crowdfund_format::format_ether;
use crowdfund_provider::{AddChainParams, ProviderError, WalletEvent, WalletProvider, codes};
use futures::{Stream, StreamExt, channel::mpsc::UnboundedReceiver};

use crate::{Session, SessionError, SessionUpdate, SessionUpdates, resolve_admin};

/// Owns the wallet session and applies every change to it.
///
/// The session is mutated only through `&mut self`, so wallet notifications are
/// applied one at a time by whoever owns the context.
#[derive(Debug)]
pub struct WalletContext<P> {
    provider: Option<P>,
    network: NetworkConfig,
    addresses: ContractAddresses,
    admin_wallet: Option<Address>,
    options: TxOptions,
    session: Session<P>,
    updates: SessionUpdates,
}

impl<P: WalletProvider + Clone> WalletContext<P> {
    /// Context over `provider`, configured by `config`.
    pub fn new(provider: P, config: &AppConfig) -> Self {
        let mut context = Self::detached(config);
        context.provider = Some(provider);
        context
    }

    /// Context without a wallet provider; connecting fails with [`SessionError::NoProvider`].
    pub fn detached(config: &AppConfig) -> Self {
        Self {
            provider: None,
            network: config.network.clone(),
            addresses: config.contracts,
            admin_wallet: config.admin_wallet,
            options: TxOptions::from(&config.wallet),
            session: Session::default(),
            updates: SessionUpdates::default(),
        }
    }

    /// Current session.
    pub const fn session(&self) -> &Session<P> {
        &self.session
    }

    /// Whether the latest lifecycle update is an unresolved connection attempt.
    ///
    /// Stays set when a [`Self::connect`] future is dropped before it resolves.
    pub fn is_connecting(&self) -> bool {
        self.updates.latest().is_some_and(|update| update.is_connecting())
    }

    /// Attached wallet provider.
    pub const fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// Whether a wallet provider is attached.
    pub const fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Network the client expects.
    pub const fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Subscribe to lifecycle updates.
    pub fn subscribe(&self) -> UnboundedReceiver<SessionUpdate> {
        self.updates.subscribe()
    }

    /// Requests account access and builds a fresh session for the first account.
    ///
    /// On failure the session is left empty and [`SessionUpdate::Failed`] is published.
    pub async fn connect(&mut self) -> Result<&Session<P>, SessionError> {
        let Some(provider) = self.provider.clone() else {
            let err = SessionError::NoProvider;
            self.updates.publish(SessionUpdate::Failed(err.user_message()));
            return Err(err);
        };

        self.updates.publish(SessionUpdate::Connecting);
        let result = self.establish(provider).await;

        match result {
            Ok(session) => {
                tracing::info!(
                    account = ?session.account,
                    chain_id = ?session.chain_id,
                    admin = session.is_admin,
                    verified = session.is_verified,
                    "wallet connected"
                );
                if let (Some(account), Some(chain_id)) = (session.account, session.chain_id) {
                    self.updates.publish(SessionUpdate::Connected { account, chain_id });
                }
                self.session = session;
                Ok(&self.session)
            }
            Err(err) => {
                tracing::warn!(error = %err, "wallet connection failed");
                self.session = Session::default();
                self.updates.publish(SessionUpdate::Failed(err.user_message()));
                Err(err)
            }
        }
    }

    async fn establish(&self, provider: P) -> Result<Session<P>, SessionError> {
        let accounts = provider.request_accounts().await?;
        let account = *accounts.first().ok_or(ProviderError::NoAccounts)?;
        let chain_id = provider.chain_id().await?;

        let contracts = Contracts::new(provider.clone(), &self.addresses, account, self.options);
        let is_admin = resolve_admin(&contracts.kyc, self.admin_wallet, account).await;
        let (kyc_status, is_verified) = match contracts.kyc.kyc_request(account).await {
            Ok(record) => match contracts.kyc.is_verified(account).await {
                Ok(verified) => (Some(record), verified),
                Err(err) => {
                    tracing::warn!(error = %err, %account, "failed to read verification");
                    (Some(record), false)
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, %account, "failed to read KYC record");
                (None, false)
            }
        };

        let balance = match provider.balance(account).await {
            Ok(balance) => format_ether(balance),
            Err(err) => {
                tracing::warn!(error = %err, %account, "failed to read balance");
                "0".to_string()
            }
        };

        Ok(Session {
            account: Some(account),
            balance,
            chain_id: Some(chain_id),
            is_admin,
            is_verified,
            kyc_status,
            contracts: Some(contracts),
        })
    }

    /// Clears the session. Wallet permissions are left as they are.
    pub fn disconnect(&mut self) {
        if let Some(account) = self.session.account {
            tracing::info!(%account, "wallet disconnected");
        }
        self.session = Session::default();
        self.updates.publish(SessionUpdate::Disconnected);
    }

    /// Re-reads the account's KYC state and balance.
    ///
    /// For an admin the KYC record is cleared instead. Read failures are logged and
    /// leave the affected fields unchanged.
    pub async fn refresh(&mut self) {
        let (Some(account), Some(contracts)) = (self.session.account, &self.session.contracts)
        else {
            return;
        };
        let contracts = contracts.clone();

        if self.session.is_admin {
            self.session.kyc_status = None;
            self.session.is_verified = false;
        } else {
            match contracts.kyc.kyc_request(account).await {
                Ok(record) => self.session.kyc_status = Some(record),
                Err(err) => tracing::warn!(error = %err, %account, "failed to refresh KYC record"),
            }
            match contracts.kyc.is_verified(account).await {
                Ok(verified) => self.session.is_verified = verified,
                Err(err) => tracing::warn!(error = %err, %account, "failed to refresh verification"),
            }
        }

        if let Some(provider) = &self.provider {
            match provider.balance(account).await {
                Ok(balance) => self.session.balance = format_ether(balance),
                Err(err) => tracing::warn!(error = %err, %account, "failed to refresh balance"),
            }
        }
        tracing::debug!(%account, verified = self.session.is_verified, "session refreshed");
    }

    /// Connects when the wallet already exposes an account without prompting.
    ///
    /// Returns whether the session is connected afterwards.
    pub async fn check_connection(&mut self) -> Result<bool, SessionError> {
        let Some(provider) = &self.provider else {
            return Ok(false);
        };
        let accounts = provider.accounts().await?;
        if accounts.is_empty() {
            tracing::debug!("no authorized accounts");
            return Ok(false);
        }
        self.connect().await?;
        Ok(true)
    }

    /// Asks the wallet to switch to the configured chain, adding it when unknown.
    pub async fn switch_network(&mut self) -> Result<(), SessionError> {
        let provider = self.provider.clone().ok_or(SessionError::NoProvider)?;
        let chain_id = self.network.chain_id;
        match provider.switch_chain(chain_id).await {
            Ok(()) => {
                tracing::info!(chain_id, "switched network");
                Ok(())
            }
            Err(err) if err.code() == Some(codes::UNRECOGNIZED_CHAIN) => {
                tracing::info!(chain_id, "chain unknown to wallet, adding it");
                provider
                    .add_chain(&AddChainParams::from(&self.network))
                    .await
                    .map_err(SessionError::AddNetwork)
            }
            Err(err) => Err(SessionError::SwitchNetwork(err)),
        }
    }

    /// Applies one wallet notification.
    pub async fn handle_event(&mut self, event: WalletEvent) {
        tracing::debug!(?event, "wallet event");
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.first() {
                None => self.disconnect(),
                Some(first) if Some(*first) != self.session.account => {
                    // Failures are already published as updates.
                    let _ = self.connect().await;
                }
                Some(_) => {}
            },
            WalletEvent::ChainChanged(chain_id) => {
                tracing::info!(chain_id, "chain changed, reloading session");
                self.disconnect();
                if let Err(err) = self.check_connection().await {
                    tracing::warn!(error = %err, "reconnect after chain change failed");
                }
            }
        }
    }

    /// Applies notifications from `events` until the stream ends.
    pub async fn run_events<S>(&mut self, mut events: S)
    where
        S: Stream<Item = WalletEvent> + Unpin,
    {
        while let Some(event) = events.next().await {
            self.handle_event(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use crowdfund_contracts::MockChain;
    use crowdfund_format::KycStatus;

    use super::*;

    const ALICE: Address = Address::repeat_byte(0xa1);
    const BOB: Address = Address::repeat_byte(0xb0);
    const OWNER: Address = Address::repeat_byte(0xad);

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.wallet.poll_interval_ms = 1;
        config
    }

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18))
    }

    #[tokio::test]
    async fn connect_fills_the_session() {
        let chain = MockChain::builder()
            .account(ALICE)
            .balance(ALICE, ether(3))
            .kyc(ALICE, "Alice", "1234512345123", true)
            .build();
        let mut context = WalletContext::new(chain, &config());
        let mut updates = context.subscribe();

        let session = context.connect().await.unwrap();
        assert_eq!(session.account, Some(ALICE));
        assert_eq!(session.chain_id, Some(31337));
        assert_eq!(session.balance, "3.0");
        assert!(session.is_verified);
        assert!(!session.is_admin);
        assert_eq!(session.kyc(), KycStatus::Approved);
        assert!(session.contracts.is_some());
        assert!(!context.is_connecting());

        assert_eq!(updates.next().await, Some(SessionUpdate::Connecting));
        assert_eq!(
            updates.next().await,
            Some(SessionUpdate::Connected { account: ALICE, chain_id: 31337 })
        );
    }

    #[tokio::test]
    async fn connect_survives_unreadable_registry() {
        let chain = MockChain::builder().account(ALICE).balance(ALICE, ether(2)).build();
        let mut config = config();
        config.contracts = ContractAddresses {
            kyc_registry: Address::repeat_byte(0x01),
            crowdfunding: Address::repeat_byte(0x02),
        };
        let mut context = WalletContext::new(chain, &config);

        let session = context.connect().await.unwrap();
        assert_eq!(session.account, Some(ALICE));
        assert_eq!(session.balance, "2.0");
        assert!(session.kyc_status.is_none());
        assert!(!session.is_verified);
        assert!(!session.is_admin);
        assert_eq!(session.kyc(), KycStatus::NotSubmitted);
        assert!(!context.is_connecting());
    }

    #[tokio::test]
    async fn connect_without_provider() {
        let mut context = WalletContext::<MockChain>::detached(&config());
        let mut updates = context.subscribe();

        let err = context.connect().await.unwrap_err();
        assert!(matches!(err, SessionError::NoProvider));
        assert!(!context.session().is_connected());
        assert!(matches!(updates.next().await, Some(SessionUpdate::Failed(_))));
    }

    #[tokio::test]
    async fn connect_rejected_leaves_session_empty() {
        let chain = MockChain::builder().account(ALICE).build();
        chain.reject_next_prompt();
        let mut context = WalletContext::new(chain, &config());
        let mut updates = context.subscribe();

        let err = context.connect().await.unwrap_err();
        assert!(matches!(err, SessionError::Provider(ProviderError::UserRejected)));
        assert!(!context.session().is_connected());
        assert_eq!(updates.next().await, Some(SessionUpdate::Connecting));
        assert_eq!(
            updates.next().await,
            Some(SessionUpdate::Failed("Transaction was cancelled by user".into()))
        );
    }

    #[tokio::test]
    async fn connect_without_accounts() {
        let chain = MockChain::builder().build();
        let mut context = WalletContext::new(chain, &config());

        let err = context.connect().await.unwrap_err();
        assert!(matches!(err, SessionError::Provider(ProviderError::NoAccounts)));
    }

    #[tokio::test]
    async fn disconnect_clears_everything() {
        let chain = MockChain::builder().account(ALICE).build();
        let mut context = WalletContext::new(chain, &config());
        context.connect().await.unwrap();

        context.disconnect();
        let session = context.session();
        assert!(!session.is_connected());
        assert!(session.contracts.is_none());
        assert!(session.kyc_status.is_none());
        assert_eq!(session.balance, "0");
    }

    #[tokio::test]
    async fn refresh_picks_up_approval() {
        let chain = MockChain::builder()
            .account(ALICE)
            .account(OWNER)
            .owner(OWNER)
            .kyc(ALICE, "Alice", "1234512345123", false)
            .build();
        let mut context = WalletContext::new(chain.clone(), &config());
        context.connect().await.unwrap();
        assert_eq!(context.session().kyc(), KycStatus::Pending);

        let owner = Contracts::new(chain.clone(), &chain.addresses(), OWNER, TxOptions::default());
        owner.kyc.approve_kyc(ALICE).await.unwrap().wait().await.unwrap();

        context.refresh().await;
        assert!(context.session().is_verified);
        assert_eq!(context.session().kyc(), KycStatus::Approved);
    }

    #[tokio::test]
    async fn refresh_clears_kyc_for_admin() {
        let chain = MockChain::builder()
            .account(OWNER)
            .owner(OWNER)
            .kyc(OWNER, "Owner", "1111111111111", true)
            .build();
        let mut context = WalletContext::new(chain, &config());
        context.connect().await.unwrap();
        assert!(context.session().is_admin);
        assert!(context.session().is_verified);

        context.refresh().await;
        assert!(context.session().kyc_status.is_none());
        assert!(!context.session().is_verified);
        assert!(context.session().can_create());
    }

    #[tokio::test]
    async fn refresh_without_session_is_a_no_op() {
        let chain = MockChain::builder().account(ALICE).build();
        let mut context = WalletContext::new(chain.clone(), &config());

        context.refresh().await;
        assert_eq!(chain.call_count(), 0);
    }

    #[tokio::test]
    async fn check_connection_needs_prior_authorization() {
        let chain = MockChain::builder().account(ALICE).build();
        let mut context = WalletContext::new(chain, &config());
        assert!(!context.check_connection().await.unwrap());
        assert!(!context.session().is_connected());

        let chain = MockChain::builder().account(ALICE).authorized().build();
        let mut context = WalletContext::new(chain, &config());
        assert!(context.check_connection().await.unwrap());
        assert_eq!(context.session().account, Some(ALICE));
    }

    #[tokio::test]
    async fn switch_network_adds_unknown_chain() {
        let chain = MockChain::builder().chain_id(1).build();
        let mut context = WalletContext::new(chain.clone(), &config());

        context.switch_network().await.unwrap();
        assert_eq!(chain.current_chain(), 31337);
    }

    #[tokio::test]
    async fn switch_network_to_known_chain() {
        let chain = MockChain::builder().chain_id(1).known_chain(31337).build();
        let mut context = WalletContext::new(chain.clone(), &config());

        context.switch_network().await.unwrap();
        assert_eq!(chain.current_chain(), 31337);
    }

    #[tokio::test]
    async fn switch_network_declined() {
        let chain = MockChain::builder().chain_id(1).build();
        chain.reject_next_prompt();
        let mut context = WalletContext::new(chain, &config());

        let err = context.switch_network().await.unwrap_err();
        assert!(matches!(err, SessionError::SwitchNetwork(ProviderError::UserRejected)));
    }

    #[tokio::test]
    async fn accounts_changed_to_other_account_reconnects() {
        let chain = MockChain::builder().account(ALICE).account(BOB).build();
        let mut context = WalletContext::new(chain, &config());
        context.connect().await.unwrap();

        context.handle_event(WalletEvent::AccountsChanged(vec![BOB])).await;
        assert_eq!(context.session().account, Some(BOB));
    }

    #[tokio::test]
    async fn accounts_changed_to_same_account_keeps_session() {
        let chain = MockChain::builder().account(ALICE).build();
        let mut context = WalletContext::new(chain.clone(), &config());
        context.connect().await.unwrap();
        let calls = chain.call_count();

        context.handle_event(WalletEvent::AccountsChanged(vec![ALICE])).await;
        assert_eq!(chain.call_count(), calls);
        assert!(context.session().is_connected());
    }

    #[tokio::test]
    async fn accounts_changed_to_empty_disconnects() {
        let chain = MockChain::builder().account(ALICE).build();
        let mut context = WalletContext::new(chain, &config());
        context.connect().await.unwrap();

        context.handle_event(WalletEvent::AccountsChanged(vec![])).await;
        assert!(!context.session().is_connected());
    }

    #[tokio::test]
    async fn chain_changed_reloads_session() {
        let chain = MockChain::builder().account(ALICE).build();
        let mut context = WalletContext::new(chain.clone(), &config());
        context.connect().await.unwrap();

        chain.set_chain_id(5);
        context.handle_event(WalletEvent::ChainChanged(5)).await;
        assert_eq!(context.session().chain_id, Some(5));
        assert_eq!(context.session().account, Some(ALICE));
    }

    #[tokio::test]
    async fn run_events_applies_wallet_notifications_in_order() {
        let chain = MockChain::builder().account(ALICE).account(BOB).build();
        let events = chain.events().subscribe();
        let mut context = WalletContext::new(chain.clone(), &config());
        context.connect().await.unwrap();

        chain.set_accounts(vec![BOB]);
        chain.set_accounts(vec![]);
        context.run_events(events.take(2)).await;
        assert!(!context.session().is_connected());
    }
}
