//! Local secp256k1 signer for EIP-1559 transactions.

use alloy_consensus::{SignableTransaction as _, TxEip1559, TxEnvelope};
use alloy_eips::eip2718::Encodable2718;
use alloy_primitives::{Address, Bytes, Signature, keccak256};
use k256::ecdsa::SigningKey;
use sha3::{Digest as _, Keccak256};

use crate::ProviderError;

/// Signing key together with its derived address.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner").field("address", &self.address).finish_non_exhaustive()
    }
}

impl LocalSigner {
    /// Creates a signer from a raw 32-byte secret.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, ProviderError> {
        let key = SigningKey::from_bytes(secret.into())
            .map_err(|e| ProviderError::Signer(e.to_string()))?;
        let address = address_from_key(&key);
        Ok(Self { key, address })
    }

    /// Address controlled by this signer.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Signs `tx` and returns its EIP-2718 encoding.
    pub fn sign_eip1559(&self, tx: TxEip1559) -> Result<Bytes, ProviderError> {
        let digest = Keccak256::new_with_prefix(tx.encoded_for_signing());
        let (sig, recid) = self
            .key
            .sign_digest_recoverable(digest)
            .map_err(|e| ProviderError::Signer(e.to_string()))?;
        let signature = Signature::from((sig, recid));
        let envelope = TxEnvelope::from(tx.into_signed(signature));
        let mut raw = Vec::new();
        envelope.encode_2718(&mut raw);
        Ok(Bytes::from(raw))
    }
}

fn address_from_key(key: &SigningKey) -> Address {
    let encoded = key.verifying_key().to_encoded_point(false);
    let pubkey = encoded.as_bytes();
    let hash = keccak256(&pubkey[1..]);
    Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{TxKind, U256, address, hex};

    use super::*;

    // First Anvil dev account.
    const ANVIL_KEY: [u8; 32] =
        hex!("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");

    #[test]
    fn test_address_from_anvil_key() {
        let signer = LocalSigner::from_bytes(&ANVIL_KEY).unwrap();
        assert_eq!(signer.address(), address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"));
    }

    #[test]
    fn test_zero_key_rejected() {
        assert!(matches!(LocalSigner::from_bytes(&[0u8; 32]), Err(ProviderError::Signer(_))));
    }

    #[test]
    fn test_sign_eip1559_is_typed_envelope() {
        let signer = LocalSigner::from_bytes(&ANVIL_KEY).unwrap();
        let tx = TxEip1559 {
            chain_id: 31337,
            nonce: 0,
            gas_limit: 100_000,
            max_fee_per_gas: 2_000_000_000,
            max_priority_fee_per_gas: 1_000_000_000,
            to: TxKind::Call(Address::repeat_byte(0xbb)),
            value: U256::from(1u64),
            access_list: Default::default(),
            input: Bytes::from(vec![0xde, 0xad]),
        };
        let raw = signer.sign_eip1559(tx.clone()).unwrap();
        assert_eq!(raw[0], 0x02);
        assert_eq!(signer.sign_eip1559(tx).unwrap(), raw);
    }

    #[test]
    fn test_debug_hides_key() {
        let signer = LocalSigner::from_bytes(&ANVIL_KEY).unwrap();
        let debug = format!("{signer:?}");
        assert!(debug.contains("address"));
        assert!(!debug.contains("ac0974"));
    }
}
