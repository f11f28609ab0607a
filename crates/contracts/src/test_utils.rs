//! In-memory chain and wallet for tests.
//!
//! [`MockChain`] plays both the injected wallet and the two deployed contracts, so
//! handles, sessions and pages can be exercised without a node.

use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use alloy_primitives::{Address, B256, Bytes, U64, U256, keccak256};
use alloy_sol_types::{SolEvent, SolInterface, SolValue};
use async_trait::async_trait;
use crowdfund_config::{ContractAddresses, DEFAULT_CHAIN_ID};
use crowdfund_provider::{
    AddChainParams, Log, LogFilter, ProviderError, TransactionReceipt, TransactionRequest,
    WalletEvent, WalletEvents, WalletProvider, codes,
};
use parking_lot::Mutex;

use crate::{ICrowdfunding::ICrowdfundingCalls, IKycRegistry, IKycRegistry::IKycRegistryCalls};

#[derive(Debug, Clone, Default)]
struct KycEntry {
    name: String,
    cnic: String,
    approved: bool,
}

#[derive(Debug, Clone)]
struct CampaignEntry {
    title: String,
    description: String,
    goal: U256,
    funds_raised: U256,
    creator: Address,
    active: bool,
    completed: bool,
    withdrawn: bool,
}

impl CampaignEntry {
    fn open(creator: Address, title: &str, description: &str, goal: U256) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            goal,
            funds_raised: U256::ZERO,
            creator,
            active: true,
            completed: false,
            withdrawn: false,
        }
    }

    fn credit(&mut self, amount: U256) {
        self.funds_raised = self.funds_raised.saturating_add(amount);
        if self.funds_raised >= self.goal {
            self.completed = true;
            self.active = false;
        }
    }
}

#[derive(Debug)]
struct ChainState {
    addresses: ContractAddresses,
    chain_id: u64,
    known_chains: BTreeSet<u64>,
    block: u64,
    accounts: Vec<Address>,
    authorized: bool,
    reject_next_prompt: bool,
    fail_next_receipt: bool,
    owner: Address,
    owner_exposed: bool,
    balances: HashMap<Address, U256>,
    kyc: HashMap<Address, KycEntry>,
    campaigns: Vec<CampaignEntry>,
    logs: Vec<Log>,
    receipts: HashMap<B256, TransactionReceipt>,
    sent: Vec<TransactionRequest>,
    calls: usize,
}

fn revert(reason: &str) -> ProviderError {
    ProviderError::Rpc {
        code: codes::EXECUTION_ERROR,
        message: format!("execution reverted: {reason}"),
    }
}

/// Storage slot of one-based campaign `id`.
fn index(id: U256) -> Option<usize> {
    id.saturating_to::<usize>().checked_sub(1)
}

impl ChainState {
    fn verified(&self, user: Address) -> bool {
        self.kyc.get(&user).is_some_and(|entry| entry.approved)
    }

    fn balance(&self, address: Address) -> U256 {
        self.balances.get(&address).copied().unwrap_or_default()
    }

    fn campaign_mut(&mut self, id: U256) -> Result<&mut CampaignEntry, ProviderError> {
        index(id)
            .and_then(|i| self.campaigns.get_mut(i))
            .ok_or_else(|| revert("Campaign does not exist"))
    }

    fn kyc_requested_log(&self, user: Address, name: &str, cnic: &str) -> Log {
        let event = IKycRegistry::KYCRequested {
            user,
            name: name.to_string(),
            cnic: cnic.to_string(),
        };
        Log {
            address: self.addresses.kyc_registry,
            topics: vec![IKycRegistry::KYCRequested::SIGNATURE_HASH, user.into_word()],
            data: event.encode_data().into(),
            block_number: Some(U64::from(self.block)),
            transaction_hash: None,
        }
    }

    fn read(&self, request: &TransactionRequest) -> Result<Bytes, ProviderError> {
        let Some(to) = request.to else {
            return Ok(Bytes::new());
        };
        if to == self.addresses.kyc_registry {
            self.read_kyc(&request.data)
        } else if to == self.addresses.crowdfunding {
            self.read_crowdfunding(&request.data)
        } else {
            Ok(Bytes::new())
        }
    }

    fn read_kyc(&self, data: &[u8]) -> Result<Bytes, ProviderError> {
        let call = IKycRegistryCalls::abi_decode(data).map_err(|_| revert("unknown selector"))?;
        let encoded = match call {
            IKycRegistryCalls::kycRequests(call) => {
                let entry = self.kyc.get(&call.user);
                let record = entry.cloned().unwrap_or_default();
                (record.name, record.cnic, record.approved, entry.is_some()).abi_encode_params()
            }
            IKycRegistryCalls::isVerified(call) => self.verified(call.user).abi_encode(),
            IKycRegistryCalls::owner(_) if self.owner_exposed => self.owner.abi_encode(),
            IKycRegistryCalls::owner(_) => return Err(revert("unknown selector")),
            _ => return Err(revert("not a view function")),
        };
        Ok(encoded.into())
    }

    fn read_crowdfunding(&self, data: &[u8]) -> Result<Bytes, ProviderError> {
        let call = ICrowdfundingCalls::abi_decode(data).map_err(|_| revert("unknown selector"))?;
        let encoded = match call {
            ICrowdfundingCalls::campaignCount(_) => U256::from(self.campaigns.len()).abi_encode(),
            ICrowdfundingCalls::campaigns(call) => {
                let entry = index(call.id).and_then(|i| self.campaigns.get(i));
                match entry {
                    Some(c) => (
                        c.title.clone(),
                        c.description.clone(),
                        c.goal,
                        c.funds_raised,
                        c.creator,
                        c.active,
                        c.completed,
                        c.withdrawn,
                    )
                        .abi_encode_params(),
                    None => (
                        String::new(),
                        String::new(),
                        U256::ZERO,
                        U256::ZERO,
                        Address::ZERO,
                        false,
                        false,
                        false,
                    )
                        .abi_encode_params(),
                }
            }
            _ => return Err(revert("not a view function")),
        };
        Ok(encoded.into())
    }

    /// Applies a transaction, leaving state untouched when it reverts.
    fn execute(&mut self, from: Address, request: &TransactionRequest) -> Result<(), ProviderError> {
        let value = request.value.unwrap_or_default();
        let to = request.to.unwrap_or_default();
        if to == self.addresses.kyc_registry {
            if !value.is_zero() {
                return Err(revert("function is not payable"));
            }
            self.execute_kyc(from, &request.data)
        } else if to == self.addresses.crowdfunding {
            self.execute_crowdfunding(from, value, &request.data)
        } else {
            Err(revert("no contract at target"))
        }
    }

    fn execute_kyc(&mut self, from: Address, data: &[u8]) -> Result<(), ProviderError> {
        let call = IKycRegistryCalls::abi_decode(data).map_err(|_| revert("unknown selector"))?;
        match call {
            IKycRegistryCalls::submitKYC(call) => {
                if self.kyc.contains_key(&from) {
                    return Err(revert("KYC already submitted"));
                }
                let log = self.kyc_requested_log(from, &call.name, &call.cnic);
                self.logs.push(log);
                self.kyc.insert(from, KycEntry { name: call.name, cnic: call.cnic, approved: false });
            }
            IKycRegistryCalls::approveKYC(call) => {
                if from != self.owner {
                    return Err(revert("Only owner"));
                }
                let entry = self.kyc.get_mut(&call.user).ok_or_else(|| revert("KYC not found"))?;
                entry.approved = true;
            }
            IKycRegistryCalls::rejectKYC(call) => {
                if from != self.owner {
                    return Err(revert("Only owner"));
                }
                self.kyc.remove(&call.user).ok_or_else(|| revert("KYC not found"))?;
            }
            _ => return Err(revert("not a state-changing function")),
        }
        Ok(())
    }

    fn execute_crowdfunding(
        &mut self,
        from: Address,
        value: U256,
        data: &[u8],
    ) -> Result<(), ProviderError> {
        let call = ICrowdfundingCalls::abi_decode(data).map_err(|_| revert("unknown selector"))?;
        if !value.is_zero() && !matches!(call, ICrowdfundingCalls::contribute(_)) {
            return Err(revert("function is not payable"));
        }
        match call {
            ICrowdfundingCalls::createCampaign(call) => {
                if !self.verified(from) && from != self.owner {
                    return Err(revert("KYC not approved"));
                }
                if call.title.is_empty() || call.description.is_empty() {
                    return Err(revert("Empty fields"));
                }
                if call.goal.is_zero() {
                    return Err(revert("Goal must be greater than 0"));
                }
                let entry = CampaignEntry::open(from, &call.title, &call.description, call.goal);
                self.campaigns.push(entry);
            }
            ICrowdfundingCalls::contribute(call) => {
                if value.is_zero() {
                    return Err(revert("Contribution must be greater than 0"));
                }
                let campaign = self.campaign_mut(call.id)?;
                if !campaign.active || campaign.completed {
                    return Err(revert("Campaign not active"));
                }
                campaign.credit(value);
                let contract = self.addresses.crowdfunding;
                let balance = self.balance(from);
                self.balances.insert(from, balance.saturating_sub(value));
                let held = self.balance(contract);
                self.balances.insert(contract, held.saturating_add(value));
            }
            ICrowdfundingCalls::withdraw(call) => {
                let campaign = self.campaign_mut(call.id)?;
                if campaign.creator != from {
                    return Err(revert("Only creator"));
                }
                if !campaign.completed || campaign.withdrawn {
                    return Err(revert("Cannot withdraw"));
                }
                campaign.withdrawn = true;
                let amount = campaign.funds_raised;
                let contract = self.addresses.crowdfunding;
                let held = self.balance(contract);
                self.balances.insert(contract, held.saturating_sub(amount));
                let balance = self.balance(from);
                self.balances.insert(from, balance.saturating_add(amount));
            }
            _ => return Err(revert("not a state-changing function")),
        }
        Ok(())
    }
}

/// Wallet and contracts simulated in memory.
///
/// Clones share state, so a test can keep one handle while the code under test
/// holds another.
#[derive(Clone, Debug)]
pub struct MockChain {
    state: Arc<Mutex<ChainState>>,
    events: WalletEvents,
}

impl MockChain {
    /// Starts building a chain.
    pub fn builder() -> MockChainBuilder {
        MockChainBuilder::default()
    }

    /// Events published when accounts or chain change.
    pub const fn events(&self) -> &WalletEvents {
        &self.events
    }

    /// Contract addresses the chain serves.
    pub fn addresses(&self) -> ContractAddresses {
        self.state.lock().addresses
    }

    /// Registry owner.
    pub fn owner(&self) -> Address {
        self.state.lock().owner
    }

    /// Replaces the wallet's accounts, as when the user switches accounts.
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        let authorized = {
            let mut state = self.state.lock();
            state.accounts = accounts.clone();
            state.authorized
        };
        if authorized {
            self.events.publish(WalletEvent::AccountsChanged(accounts));
        }
    }

    /// Moves the wallet to another chain, as when the user switches networks.
    pub fn set_chain_id(&self, chain_id: u64) {
        {
            let mut state = self.state.lock();
            state.known_chains.insert(chain_id);
            state.chain_id = chain_id;
        }
        self.events.publish(WalletEvent::ChainChanged(chain_id));
    }

    /// Current chain id.
    pub fn current_chain(&self) -> u64 {
        self.state.lock().chain_id
    }

    /// Credits `amount` to `address`.
    pub fn fund(&self, address: Address, amount: U256) {
        let mut state = self.state.lock();
        let balance = state.balance(address);
        state.balances.insert(address, balance.saturating_add(amount));
    }

    /// Native balance of `address`.
    pub fn balance_of(&self, address: Address) -> U256 {
        self.state.lock().balance(address)
    }

    /// The next prompt (connect, send, switch or add chain) is declined.
    pub fn reject_next_prompt(&self) {
        self.state.lock().reject_next_prompt = true;
    }

    /// The next transaction is mined but reverts.
    pub fn fail_next_receipt(&self) {
        self.state.lock().fail_next_receipt = true;
    }

    /// Number of read calls served.
    pub fn call_count(&self) -> usize {
        self.state.lock().calls
    }

    /// Every transaction the wallet accepted for signing, in order.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state.lock().sent.clone()
    }

    fn take_rejection(state: &mut ChainState) -> Result<(), ProviderError> {
        if std::mem::take(&mut state.reject_next_prompt) {
            return Err(ProviderError::UserRejected);
        }
        Ok(())
    }
}

#[async_trait]
impl WalletProvider for MockChain {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let mut state = self.state.lock();
        Self::take_rejection(&mut state)?;
        state.authorized = true;
        Ok(state.accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>, ProviderError> {
        let state = self.state.lock();
        Ok(if state.authorized { state.accounts.clone() } else { Vec::new() })
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.state.lock().chain_id)
    }

    async fn block_number(&self) -> Result<u64, ProviderError> {
        Ok(self.state.lock().block)
    }

    async fn balance(&self, address: Address) -> Result<U256, ProviderError> {
        Ok(self.state.lock().balance(address))
    }

    async fn call(&self, request: &TransactionRequest) -> Result<Bytes, ProviderError> {
        let mut state = self.state.lock();
        state.calls += 1;
        state.read(request)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<B256, ProviderError> {
        let mut state = self.state.lock();
        let from = request.from.ok_or(ProviderError::NoAccounts)?;
        if !state.authorized || !state.accounts.contains(&from) {
            return Err(ProviderError::Rpc {
                code: codes::UNAUTHORIZED,
                message: format!("account {from} is not authorized"),
            });
        }
        Self::take_rejection(&mut state)?;
        state.sent.push(request.clone());

        let value = request.value.unwrap_or_default();
        if state.balance(from) < value {
            return Err(ProviderError::Rpc {
                code: -32003,
                message: "insufficient funds for gas * price + value".to_string(),
            });
        }

        let reverted = std::mem::take(&mut state.fail_next_receipt);
        if !reverted {
            state.execute(from, &request)?;
        }

        state.block += 1;
        let nonce = state.sent.len() as u64;
        let hash = keccak256([from.as_slice(), &nonce.to_be_bytes()[..]].concat());
        let receipt = TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(U64::from(state.block)),
            status: Some(U64::from(u8::from(!reverted))),
            gas_used: U64::from(21_000),
        };
        state.receipts.insert(hash, receipt);
        for log in state.logs.iter_mut().filter(|log| log.transaction_hash.is_none()) {
            log.transaction_hash = Some(hash);
        }
        Ok(hash)
    }

    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        Ok(self.state.lock().receipts.get(&hash).cloned())
    }

    async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ProviderError> {
        let state = self.state.lock();
        Ok(state.logs.iter().filter(|log| filter.matches(log)).cloned().collect())
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        {
            let mut state = self.state.lock();
            Self::take_rejection(&mut state)?;
            if !state.known_chains.contains(&chain_id) {
                return Err(ProviderError::Rpc {
                    code: codes::UNRECOGNIZED_CHAIN,
                    message: format!("Unrecognized chain ID {chain_id:#x}"),
                });
            }
            if state.chain_id == chain_id {
                return Ok(());
            }
            state.chain_id = chain_id;
        }
        self.events.publish(WalletEvent::ChainChanged(chain_id));
        Ok(())
    }

    async fn add_chain(&self, params: &AddChainParams) -> Result<(), ProviderError> {
        let chain_id = u64::from_str_radix(params.chain_id.trim_start_matches("0x"), 16)
            .map_err(|e| ProviderError::Rpc {
                code: codes::INTERNAL_ERROR,
                message: format!("invalid chain id {}: {e}", params.chain_id),
            })?;
        let changed = {
            let mut state = self.state.lock();
            Self::take_rejection(&mut state)?;
            state.known_chains.insert(chain_id);
            let changed = state.chain_id != chain_id;
            state.chain_id = chain_id;
            changed
        };
        if changed {
            self.events.publish(WalletEvent::ChainChanged(chain_id));
        }
        Ok(())
    }
}

/// Builder for [`MockChain`].
#[derive(Debug)]
pub struct MockChainBuilder {
    addresses: ContractAddresses,
    chain_id: u64,
    known_chains: BTreeSet<u64>,
    accounts: Vec<Address>,
    authorized: bool,
    owner: Address,
    owner_exposed: bool,
    balances: HashMap<Address, U256>,
    kyc: Vec<(Address, KycEntry)>,
    campaigns: Vec<(CampaignEntry, U256)>,
}

impl Default for MockChainBuilder {
    fn default() -> Self {
        Self {
            addresses: ContractAddresses::default(),
            chain_id: DEFAULT_CHAIN_ID,
            known_chains: BTreeSet::from([DEFAULT_CHAIN_ID]),
            accounts: Vec::new(),
            authorized: false,
            owner: Address::repeat_byte(0xad),
            owner_exposed: true,
            balances: HashMap::new(),
            kyc: Vec::new(),
            campaigns: Vec::new(),
        }
    }
}

impl MockChainBuilder {
    /// Adds a wallet account; the first one added is the primary account.
    pub fn account(mut self, account: Address) -> Self {
        self.accounts.push(account);
        self
    }

    /// Marks the wallet's accounts as already authorized.
    pub const fn authorized(mut self) -> Self {
        self.authorized = true;
        self
    }

    /// Sets the registry owner.
    pub const fn owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    /// Deploys a registry without an `owner()` accessor.
    pub const fn without_owner_accessor(mut self) -> Self {
        self.owner_exposed = false;
        self
    }

    /// Starts the wallet on `chain_id`.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self.known_chains.insert(chain_id);
        self
    }

    /// Lets the wallet switch to `chain_id` without adding it first.
    pub fn known_chain(mut self, chain_id: u64) -> Self {
        self.known_chains.insert(chain_id);
        self
    }

    /// Overrides the contract addresses.
    pub fn addresses(mut self, addresses: ContractAddresses) -> Self {
        self.addresses = addresses;
        self
    }

    /// Sets the native balance of `address`.
    pub fn balance(mut self, address: Address, amount: U256) -> Self {
        self.balances.insert(address, amount);
        self
    }

    /// Records a KYC submission by `user`, approved or pending.
    pub fn kyc(mut self, user: Address, name: &str, cnic: &str, approved: bool) -> Self {
        let entry = KycEntry { name: name.to_string(), cnic: cnic.to_string(), approved };
        self.kyc.push((user, entry));
        self
    }

    /// Opens a campaign by `creator` that has already raised `raised`.
    pub fn campaign(
        mut self,
        creator: Address,
        title: &str,
        description: &str,
        goal: U256,
        raised: U256,
    ) -> Self {
        self.campaigns.push((CampaignEntry::open(creator, title, description, goal), raised));
        self
    }

    /// Builds the chain.
    pub fn build(self) -> MockChain {
        let mut state = ChainState {
            addresses: self.addresses,
            chain_id: self.chain_id,
            known_chains: self.known_chains,
            block: 1,
            accounts: self.accounts,
            authorized: self.authorized,
            reject_next_prompt: false,
            fail_next_receipt: false,
            owner: self.owner,
            owner_exposed: self.owner_exposed,
            balances: self.balances,
            kyc: HashMap::new(),
            campaigns: Vec::new(),
            logs: Vec::new(),
            receipts: HashMap::new(),
            sent: Vec::new(),
            calls: 0,
        };
        for (user, entry) in self.kyc {
            let mut log = state.kyc_requested_log(user, &entry.name, &entry.cnic);
            log.transaction_hash = Some(B256::ZERO);
            state.logs.push(log);
            state.kyc.insert(user, entry);
        }
        for (mut campaign, raised) in self.campaigns {
            if !raised.is_zero() {
                campaign.credit(raised);
            }
            state.campaigns.push(campaign);
        }
        MockChain { state: Arc::new(Mutex::new(state)), events: WalletEvents::new() }
    }
}
