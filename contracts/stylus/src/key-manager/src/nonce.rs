//! Channel-scoped replay protection for relayed actions.
//!
//! Each signer owns an independent counter per 128-bit channel. A relayed action carries the
//! composite nonce `channel << 128 | counter` and is accepted only when `counter` equals the
//! current value for that channel; accepting it bumps the counter by one.

use alloc::collections::BTreeMap;

use stylus_sdk::alloy_primitives::{Address, U256};

use crate::{
    errors::KeyManagerError,
    types::{compose_nonce, decompose_nonce},
};

/// Persistent `(signer, channel) -> counter` storage plus the ledger rules on top of it.
pub trait NonceLedger {
    fn load(&self, signer: Address, channel: u128) -> u128;

    fn store(&mut self, signer: Address, channel: u128, counter: u128);

    fn current(&self, signer: Address, channel: u128) -> u128 {
        self.load(signer, channel)
    }

    /// The composite nonce the signer must use next in `channel`.
    fn get_nonce(&self, signer: Address, channel: u128) -> U256 {
        compose_nonce(channel, self.current(signer, channel))
    }

    /// Check `presented` against the current counter without consuming it.
    fn ensure_current(
        &self,
        signer: Address,
        channel: u128,
        presented: U256,
    ) -> Result<u128, KeyManagerError> {
        let (_, counter) = decompose_nonce(presented);
        let current = self.current(signer, channel);
        if counter != current {
            return Err(KeyManagerError::InvalidNonce {
                signer,
                nonce: presented,
            });
        }
        Ok(current)
    }

    /// Accept `presented` and advance the channel. Returns the new counter.
    ///
    /// Read, compare and increment happen under one `&mut` borrow, so a nonce can never be
    /// accepted twice.
    fn validate_and_consume(
        &mut self,
        signer: Address,
        channel: u128,
        presented: U256,
    ) -> Result<u128, KeyManagerError> {
        let current = self.ensure_current(signer, channel, presented)?;
        let next = current
            .checked_add(1)
            .ok_or(KeyManagerError::InvalidNonce {
                signer,
                nonce: presented,
            })?;
        self.store(signer, channel, next);
        Ok(next)
    }
}

impl<N: NonceLedger + ?Sized> NonceLedger for &mut N {
    fn load(&self, signer: Address, channel: u128) -> u128 {
        (**self).load(signer, channel)
    }

    fn store(&mut self, signer: Address, channel: u128, counter: u128) {
        (**self).store(signer, channel, counter)
    }
}

/// In-memory ledger, for off-chain simulation and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryNonceLedger {
    counters: BTreeMap<(Address, u128), u128>,
}

impl NonceLedger for MemoryNonceLedger {
    fn load(&self, signer: Address, channel: u128) -> u128 {
        self.counters.get(&(signer, channel)).copied().unwrap_or_default()
    }

    fn store(&mut self, signer: Address, channel: u128, counter: u128) {
        self.counters.insert((signer, channel), counter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stylus_sdk::alloy_primitives::address;

    const SIGNER: Address = address!("0x1111111111111111111111111111111111111111");

    #[test]
    fn test_new_channel_starts_at_zero() {
        let ledger = MemoryNonceLedger::default();
        assert_eq!(ledger.current(SIGNER, 5), 0);
        assert_eq!(ledger.get_nonce(SIGNER, 5), compose_nonce(5, 0));
    }

    #[test]
    fn test_each_counter_is_accepted_once() {
        let mut ledger = MemoryNonceLedger::default();
        for counter in 0..5u128 {
            let nonce = compose_nonce(1, counter);
            assert_eq!(ledger.validate_and_consume(SIGNER, 1, nonce), Ok(counter + 1));
            assert_eq!(
                ledger.validate_and_consume(SIGNER, 1, nonce),
                Err(KeyManagerError::InvalidNonce { signer: SIGNER, nonce })
            );
        }
        assert_eq!(ledger.current(SIGNER, 1), 5);
    }

    #[test]
    fn test_skipping_ahead_is_rejected() {
        let mut ledger = MemoryNonceLedger::default();
        let nonce = compose_nonce(0, 1);
        assert_eq!(
            ledger.validate_and_consume(SIGNER, 0, nonce),
            Err(KeyManagerError::InvalidNonce { signer: SIGNER, nonce })
        );
        assert_eq!(ledger.current(SIGNER, 0), 0);
    }

    #[test]
    fn test_channels_and_signers_are_independent() {
        let other = address!("0x2222222222222222222222222222222222222222");
        let mut ledger = MemoryNonceLedger::default();

        for counter in 0..3 {
            ledger
                .validate_and_consume(SIGNER, 7, compose_nonce(7, counter))
                .unwrap();
        }
        assert_eq!(ledger.current(SIGNER, 7), 3);
        assert_eq!(ledger.current(SIGNER, 8), 0);
        assert_eq!(ledger.current(other, 7), 0);

        // Counter 0 is still fresh in another channel.
        assert_eq!(ledger.validate_and_consume(SIGNER, 8, compose_nonce(8, 0)), Ok(1));
    }

    #[test]
    fn test_counter_overflow_is_rejected() {
        let mut ledger = MemoryNonceLedger::default();
        ledger.store(SIGNER, 0, u128::MAX);
        let nonce = compose_nonce(0, u128::MAX);
        assert!(matches!(
            ledger.validate_and_consume(SIGNER, 0, nonce),
            Err(KeyManagerError::InvalidNonce { .. })
        ));
        assert_eq!(ledger.current(SIGNER, 0), u128::MAX);
    }

    #[test]
    fn test_ledger_through_mutable_reference() {
        fn consume_first<N: NonceLedger>(mut ledger: N) -> u128 {
            ledger
                .validate_and_consume(SIGNER, 2, compose_nonce(2, 0))
                .unwrap()
        }

        let mut ledger = MemoryNonceLedger::default();
        assert_eq!(consume_first(&mut ledger), 1);
        assert_eq!(ledger.current(SIGNER, 2), 1);
    }

    const SIGNERS: [Address; 3] = [
        address!("0x1111111111111111111111111111111111111111"),
        address!("0x2222222222222222222222222222222222222222"),
        address!("0x3333333333333333333333333333333333333333"),
    ];
    const CHANNELS: [u128; 3] = [0, 1, u128::MAX];

    proptest! {
        #[test]
        fn test_ledger_accepts_exactly_the_current_counter(
            submissions in prop::collection::vec((0..SIGNERS.len(), 0..CHANNELS.len(), 0u128..4), 0..64)
        ) {
            let mut ledger = MemoryNonceLedger::default();
            let mut expected = BTreeMap::new();

            for (signer_idx, channel_idx, counter) in submissions {
                let (signer, channel) = (SIGNERS[signer_idx], CHANNELS[channel_idx]);
                let nonce = compose_nonce(channel, counter);
                let current: u128 = expected.get(&(signer, channel)).copied().unwrap_or_default();

                let result = ledger.validate_and_consume(signer, channel, nonce);
                if counter == current {
                    prop_assert_eq!(result, Ok(current + 1));
                    expected.insert((signer, channel), current + 1);
                } else {
                    prop_assert_eq!(result, Err(KeyManagerError::InvalidNonce { signer, nonce }));
                }

                for other_signer in SIGNERS {
                    for other_channel in CHANNELS {
                        let want = expected.get(&(other_signer, other_channel)).copied().unwrap_or_default();
                        prop_assert_eq!(ledger.current(other_signer, other_channel), want);
                    }
                }
            }
        }
    }
}
