//! Typed handle for the KYC registry.

use alloy_primitives::Address;
use alloy_sol_types::SolEvent;
use crowdfund_provider::{LogFilter, PendingTransaction, WalletProvider};

use crate::{Contract, ContractError, IKycRegistry, KycRecord};

/// The KYC registry contract.
#[derive(Debug, Clone)]
pub struct KycRegistry<P> {
    contract: Contract<P>,
}

impl<P: WalletProvider + Clone> KycRegistry<P> {
    /// Wraps a contract handle.
    pub const fn new(contract: Contract<P>) -> Self {
        Self { contract }
    }

    /// Registry address.
    pub const fn address(&self) -> Address {
        self.contract.address()
    }

    /// The record stored for `user`; a default record when none was submitted.
    pub async fn kyc_request(&self, user: Address) -> Result<KycRecord, ContractError> {
        let record = self.contract.read(IKycRegistry::kycRequestsCall { user }).await?;
        Ok(record.into())
    }

    /// Whether `user` is approved.
    pub async fn is_verified(&self, user: Address) -> Result<bool, ContractError> {
        self.contract.read(IKycRegistry::isVerifiedCall { user }).await
    }

    /// Registry owner, for deployments that expose it.
    pub async fn owner(&self) -> Result<Address, ContractError> {
        self.contract.read(IKycRegistry::ownerCall {}).await
    }

    /// Submits the caller's KYC details.
    pub async fn submit_kyc(
        &self,
        name: &str,
        cnic: &str,
    ) -> Result<PendingTransaction<P>, ContractError> {
        let call = IKycRegistry::submitKYCCall { name: name.to_string(), cnic: cnic.to_string() };
        self.contract.write(call, None).await
    }

    /// Approves `user`. Only the registry owner may call this.
    pub async fn approve_kyc(&self, user: Address) -> Result<PendingTransaction<P>, ContractError> {
        self.contract.write(IKycRegistry::approveKYCCall { user }, None).await
    }

    /// Rejects `user`. Only the registry owner may call this.
    pub async fn reject_kyc(&self, user: Address) -> Result<PendingTransaction<P>, ContractError> {
        self.contract.write(IKycRegistry::rejectKYCCall { user }, None).await
    }

    /// Users named by every `KYCRequested` log, oldest first, repeats included.
    pub async fn requested_users(&self) -> Result<Vec<Address>, ContractError> {
        let filter =
            LogFilter::event(self.contract.address(), IKycRegistry::KYCRequested::SIGNATURE_HASH);
        let logs = self.contract.provider().logs(&filter).await?;
        let users: Vec<Address> = logs
            .iter()
            .filter_map(|log| log.topics.get(1))
            .map(|word| Address::from_word(*word))
            .collect();
        tracing::debug!(logs = logs.len(), users = users.len(), "read KYC request history");
        Ok(users)
    }
}
