//! Admin resolution.

use alloy_primitives::Address;
use crowdfund_contracts::KycRegistry;
use crowdfund_provider::WalletProvider;

/// Whether `account` administers the KYC registry.
///
/// A configured admin address decides alone. Only without one is the registry's
/// `owner()` consulted; deployments without that accessor resolve to not admin.
/// Addresses compare by value, so checksum casing never matters.
pub async fn resolve_admin<P>(
    registry: &KycRegistry<P>,
    configured: Option<Address>,
    account: Address,
) -> bool
where
    P: WalletProvider + Clone,
{
    if let Some(admin) = configured {
        return admin == account;
    }
    match registry.owner().await {
        Ok(owner) => owner == account,
        Err(err) => {
            tracing::debug!(error = %err, registry = %registry.address(), "owner lookup failed");
            false
        }
    }
}
