//! Cryptographic helpers used by the key manager.
//!
//! Recovery goes through the EVM `ecrecover` precompile so the contract carries no curve code.

use stylus_sdk::{
    alloy_primitives::{address, Address, FixedBytes, U256},
    call::RawCall,
};

use crate::types::SignerRecovery;

/// secp256k1 group order divided by two. Signatures with a larger `s` are malleable twins.
const SECP256K1_HALF_ORDER: U256 = U256::from_limbs([
    0xdfe92f46681b20a0,
    0x5d576e7357a4501d,
    0xffffffffffffffff,
    0x7fffffffffffffff,
]);

const ECRECOVER: Address = address!("0x0000000000000000000000000000000000000001");

/// Recover an EOA address from a 32-byte digest and a 65-byte `r || s || v` signature.
///
/// v must be one of {0, 1, 27, 28}; anything else is rejected rather than guessed. High-s
/// signatures are rejected so every message has exactly one valid signature.
pub fn ecrecover_address(digest: FixedBytes<32>, sig: &[u8]) -> Result<Address, ()> {
    let input = ecrecover_input(digest, sig).ok_or(())?;
    let out = unsafe { RawCall::new_static().gas(50_000).call(ECRECOVER, &input) }.map_err(|_| ())?;

    // The precompile answers with empty data on failure and a left-padded address otherwise.
    let word = out.get(..32).ok_or(())?;
    let recovered = Address::from_slice(&word[12..]);
    if recovered == Address::ZERO {
        return Err(());
    }
    Ok(recovered)
}

/// `digest | v | r | s`, each a 32-byte word. `None` when the signature is not acceptable.
fn ecrecover_input(digest: FixedBytes<32>, sig: &[u8]) -> Option<[u8; 128]> {
    let sig: &[u8; 65] = sig.try_into().ok()?;
    let v = match sig[64] {
        v @ (27 | 28) => v,
        v @ (0 | 1) => v + 27,
        _ => return None,
    };
    if U256::from_be_slice(&sig[32..64]) > SECP256K1_HALF_ORDER {
        return None;
    }

    let mut input = [0u8; 128];
    input[..32].copy_from_slice(digest.as_slice());
    input[63] = v;
    input[64..].copy_from_slice(&sig[..64]);
    Some(input)
}

/// Signer recovery backed by the `ecrecover` precompile.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ecrecover;

impl SignerRecovery for Ecrecover {
    fn recover(&self, digest: FixedBytes<32>, signature: &[u8]) -> Option<Address> {
        ecrecover_address(digest, signature).ok()
    }
}
