//! Composite relay nonces: `channel (high 128 bits) ++ counter (low 128 bits)`.

use alloy_primitives::U256;

/// Pack a channel id and the counter within that channel into the nonce a relayer signs.
pub fn compose_nonce(channel: u128, counter: u128) -> U256 {
    let limbs = [
        counter as u64,
        (counter >> 64) as u64,
        channel as u64,
        (channel >> 64) as u64,
    ];
    U256::from_limbs(limbs)
}

/// Split a signed nonce into `(channel, counter)`.
pub fn decompose_nonce(nonce: U256) -> (u128, u128) {
    let limbs = nonce.as_limbs();
    let counter = ((limbs[1] as u128) << 64) | limbs[0] as u128;
    let channel = ((limbs[3] as u128) << 64) | limbs[2] as u128;
    (channel, counter)
}
