//! Local secp256k1 signing and recovery, matching what the contract accepts.

use alloy_primitives::{Address, FixedBytes};
use k256::ecdsa::{Error, RecoveryId, Signature, SigningKey, VerifyingKey};
use key_manager_types::SignerRecovery;

use crate::{encoder::keccak256_bytes, types::RelayCall};

/// Ethereum address of a public key: last 20 bytes of keccak256 over the uncompressed point.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256_bytes(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

pub struct LocalSigner {
    key: SigningKey,
}

impl LocalSigner {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    pub fn from_slice(secret: &[u8]) -> Result<Self, Error> {
        SigningKey::from_slice(secret).map(Self::new)
    }

    pub fn address(&self) -> Address {
        address_of(self.key.verifying_key())
    }

    /// Sign a 32-byte digest as-is. Returns `r || s || v` with low `s` and `v` in {27, 28}.
    pub fn sign_digest(&self, digest: FixedBytes<32>) -> Result<Vec<u8>, Error> {
        let (mut signature, mut recovery_id) = self.key.sign_prehash_recoverable(digest.as_slice())?;
        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
            recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
        }

        let mut sig_bytes = Vec::with_capacity(65);
        sig_bytes.extend_from_slice(&signature.to_bytes());
        sig_bytes.push(27 + recovery_id.to_byte());
        Ok(sig_bytes)
    }

    /// Sign the relay digest and write the signature into `call.signature`.
    pub fn sign_relay_call(&self, call: &mut RelayCall) -> Result<(), Error> {
        call.signature = self.sign_digest(call.digest())?;
        Ok(())
    }
}

/// Pure-Rust counterpart of the contract's `ecrecover` based recovery.
///
/// Applies the same acceptance rules: 65 bytes, `v` in {0, 1, 27, 28}, low `s` only.
#[derive(Clone, Copy, Debug, Default)]
pub struct K256Recovery;

impl SignerRecovery for K256Recovery {
    fn recover(&self, digest: FixedBytes<32>, signature: &[u8]) -> Option<Address> {
        if signature.len() != 65 {
            return None;
        }
        let v = match signature[64] {
            27 | 28 => signature[64] - 27,
            0 | 1 => signature[64],
            _ => return None,
        };
        let sig = Signature::from_slice(&signature[..64]).ok()?;
        if sig.normalize_s().is_some() {
            return None;
        }
        let recovery_id = RecoveryId::from_byte(v)?;
        let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &sig, recovery_id).ok()?;
        Some(address_of(&key))
    }
}
