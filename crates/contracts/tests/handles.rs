//! Contract handles against the in-memory chain.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use crowdfund_config::NetworkConfig;
use crowdfund_contracts::{Contracts, MockChain, TxOptions};
use crowdfund_format::{ErrorKind, KycStatus};
use crowdfund_provider::{
    AddChainParams, ProviderError, ProviderWatcher, WalletEvent, WalletProvider,
};
use futures::StreamExt;

const ALICE: Address = Address::repeat_byte(0xa1);
const BOB: Address = Address::repeat_byte(0xb0);
const OWNER: Address = Address::repeat_byte(0xad);

fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18))
}

fn options() -> TxOptions {
    TxOptions { poll_interval: Duration::from_millis(1), confirmations: 1 }
}

fn contracts(chain: &MockChain, account: Address) -> Contracts<MockChain> {
    Contracts::new(chain.clone(), &chain.addresses(), account, options())
}

#[tokio::test]
async fn kyc_submission_is_pending_then_approved() {
    let chain = MockChain::builder().account(ALICE).account(OWNER).owner(OWNER).authorized().build();
    let alice = contracts(&chain, ALICE);

    let before = alice.kyc.kyc_request(ALICE).await.unwrap();
    assert_eq!(before.status(), KycStatus::NotSubmitted);

    alice.kyc.submit_kyc("Alice", "1234512345123").await.unwrap().wait().await.unwrap();
    let pending = alice.kyc.kyc_request(ALICE).await.unwrap();
    assert_eq!(pending.status(), KycStatus::Pending);
    assert_eq!(pending.cnic, "1234512345123");
    assert!(!alice.kyc.is_verified(ALICE).await.unwrap());

    let owner = contracts(&chain, OWNER);
    owner.kyc.approve_kyc(ALICE).await.unwrap().wait().await.unwrap();
    assert!(alice.kyc.is_verified(ALICE).await.unwrap());
    assert_eq!(alice.kyc.kyc_request(ALICE).await.unwrap().status(), KycStatus::Approved);
}

#[tokio::test]
async fn reject_removes_the_record() {
    let chain = MockChain::builder()
        .account(OWNER)
        .owner(OWNER)
        .authorized()
        .kyc(ALICE, "Alice", "1234512345123", false)
        .build();
    let owner = contracts(&chain, OWNER);

    owner.kyc.reject_kyc(ALICE).await.unwrap().wait().await.unwrap();
    let record = owner.kyc.kyc_request(ALICE).await.unwrap();
    assert!(!record.exists);
}

#[tokio::test]
async fn approve_by_non_owner_reverts() {
    let chain = MockChain::builder()
        .account(BOB)
        .owner(OWNER)
        .authorized()
        .kyc(ALICE, "Alice", "1234512345123", false)
        .build();
    let bob = contracts(&chain, BOB);

    let err = bob.kyc.approve_kyc(ALICE).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExecutionReverted);
}

#[tokio::test]
async fn requested_users_follow_log_order() {
    let chain = MockChain::builder()
        .account(BOB)
        .authorized()
        .kyc(ALICE, "Alice", "1234512345123", false)
        .build();
    let bob = contracts(&chain, BOB);
    bob.kyc.submit_kyc("Bob", "9876598765987").await.unwrap().wait().await.unwrap();

    assert_eq!(bob.kyc.requested_users().await.unwrap(), vec![ALICE, BOB]);
}

#[tokio::test]
async fn owner_accessor_is_optional() {
    let chain = MockChain::builder().owner(OWNER).build();
    assert_eq!(contracts(&chain, ALICE).kyc.owner().await.unwrap(), OWNER);

    let chain = MockChain::builder().without_owner_accessor().build();
    assert!(contracts(&chain, ALICE).kyc.owner().await.is_err());
}

#[tokio::test]
async fn campaigns_are_listed_newest_first() {
    let chain = MockChain::builder()
        .campaign(ALICE, "First", "one", ether(10), U256::ZERO)
        .campaign(BOB, "Second", "two", ether(5), ether(5))
        .build();
    let handles = contracts(&chain, ALICE);

    assert_eq!(handles.crowdfunding.campaign_count().await.unwrap(), 2);
    let campaigns = handles.crowdfunding.campaigns().await.unwrap();
    let ids: Vec<u64> = campaigns.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert!(campaigns[0].completed);
    assert!(!campaigns[0].active);
}

#[tokio::test]
async fn unknown_campaign_is_not_found() {
    let chain = MockChain::builder().build();
    let handles = contracts(&chain, ALICE);

    let raw = handles.crowdfunding.campaign(7).await.unwrap();
    assert!(!raw.exists());
    assert!(handles.crowdfunding.find_campaign(7).await.unwrap().is_none());
}

#[tokio::test]
async fn contribute_and_withdraw_move_funds() {
    let chain = MockChain::builder()
        .account(ALICE)
        .account(BOB)
        .authorized()
        .balance(BOB, ether(20))
        .kyc(ALICE, "Alice", "1234512345123", true)
        .build();
    let alice = contracts(&chain, ALICE);
    let bob = contracts(&chain, BOB);

    let pending = alice.crowdfunding.create_campaign("Well", "Clean water", ether(10)).await;
    pending.unwrap().wait().await.unwrap();
    bob.crowdfunding.contribute(1, ether(10)).await.unwrap().wait().await.unwrap();

    let campaign = alice.crowdfunding.campaign(1).await.unwrap();
    assert_eq!(campaign.funds_raised, ether(10));
    assert!(campaign.can_withdraw(Some(ALICE)));
    assert!(!campaign.can_withdraw(Some(BOB)));
    assert_eq!(chain.balance_of(BOB), ether(10));

    alice.crowdfunding.withdraw(1).await.unwrap().wait().await.unwrap();
    assert!(alice.crowdfunding.campaign(1).await.unwrap().withdrawn);
    assert_eq!(chain.balance_of(ALICE), ether(10));
}

#[tokio::test]
async fn create_requires_verified_creator() {
    let chain = MockChain::builder().account(ALICE).authorized().build();
    let alice = contracts(&chain, ALICE);

    let err = alice.crowdfunding.create_campaign("Well", "Clean water", ether(1)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExecutionReverted);
    assert_eq!(alice.crowdfunding.campaign_count().await.unwrap(), 0);
}

#[tokio::test]
async fn contribute_beyond_balance_is_insufficient_funds() {
    let chain = MockChain::builder()
        .account(BOB)
        .authorized()
        .balance(BOB, ether(1))
        .campaign(ALICE, "Well", "Clean water", ether(10), U256::ZERO)
        .build();
    let bob = contracts(&chain, BOB);

    let err = bob.crowdfunding.contribute(1, ether(2)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
}

#[tokio::test]
async fn declined_prompt_is_user_rejected() {
    let chain = MockChain::builder().account(ALICE).authorized().build();
    let alice = contracts(&chain, ALICE);
    chain.reject_next_prompt();

    let err = alice.kyc.submit_kyc("Alice", "1234512345123").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UserRejected);
}

#[tokio::test]
async fn reverted_receipt_fails_the_wait() {
    let chain = MockChain::builder().account(ALICE).authorized().build();
    let alice = contracts(&chain, ALICE);
    chain.fail_next_receipt();

    let pending = alice.kyc.submit_kyc("Alice", "1234512345123").await.unwrap();
    let hash = pending.hash();
    let err = pending.wait().await.unwrap_err();
    assert!(matches!(err, ProviderError::Reverted(h) if h == hash));
    assert!(!alice.kyc.kyc_request(ALICE).await.unwrap().exists);
}

#[tokio::test]
async fn watcher_reports_chain_change() {
    let chain = MockChain::builder().account(ALICE).authorized().build();
    let events = chain.events().clone();
    let mut watcher = ProviderWatcher::new(chain.clone(), events.clone(), Duration::from_millis(1));

    assert!(watcher.poll_once().await.is_empty());

    let mainnet = NetworkConfig { chain_id: 1, ..Default::default() };
    chain.add_chain(&AddChainParams::from(&mainnet)).await.unwrap();
    let mut receiver = events.subscribe();
    let changes = watcher.poll_once().await;
    assert_eq!(changes, vec![WalletEvent::ChainChanged(1)]);
    assert_eq!(receiver.next().await, Some(WalletEvent::ChainChanged(1)));
}
