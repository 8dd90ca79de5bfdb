//! Relay message construction and digest computation.
//!
//! A relayed action is signed over `key_manager (20) || payload || nonce (32, big-endian)`.
//! Binding the key manager address stops a signature from being replayed against another
//! key manager; binding the composite nonce pins it to one slot of one channel.

use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::{keccak256, Address, FixedBytes, U256};

const ETH_SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

pub fn relay_message(key_manager: Address, payload: &[u8], nonce: U256) -> Vec<u8> {
    let mut buf = Vec::with_capacity(20 + payload.len() + 32);
    buf.extend_from_slice(key_manager.as_slice());
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&nonce.to_be_bytes::<32>());
    buf
}

/// Digest a relayer's signer must sign: the `eth_sign` hash of `keccak256(relay_message)`.
pub fn relay_digest(key_manager: Address, payload: &[u8], nonce: U256) -> FixedBytes<32> {
    let message_hash = keccak256(relay_message(key_manager, payload, nonce));

    let mut buf = Vec::with_capacity(ETH_SIGNED_MESSAGE_PREFIX.len() + 32);
    buf.extend_from_slice(ETH_SIGNED_MESSAGE_PREFIX);
    buf.extend_from_slice(message_hash.as_slice());
    keccak256(buf)
}
