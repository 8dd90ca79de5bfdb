use alloy_primitives::{Address, FixedBytes, U256};
use key_manager_types::compose_nonce;

use crate::encoder::relay_digest;

/// A relayed action as submitted to `executeRelayCall`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayCall {
    /// Key manager the signer intends to act through.
    pub key_manager: Address,
    /// Composite `channel << 128 | counter` nonce.
    pub nonce: U256,
    /// Encoded account call.
    pub payload: Vec<u8>,

    /// 65-byte `r || s || v` signature over [`RelayCall::digest`]. Empty until signed.
    pub signature: Vec<u8>,
}

impl RelayCall {
    pub fn new(key_manager: Address, channel: u128, counter: u128, payload: Vec<u8>) -> Self {
        Self {
            key_manager,
            nonce: compose_nonce(channel, counter),
            payload,
            signature: Vec::new(),
        }
    }

    pub fn digest(&self) -> FixedBytes<32> {
        relay_digest(self.key_manager, &self.payload, self.nonce)
    }
}
