use alloy_primitives::{Address, FixedBytes};

/// Recovers the address that produced a signature over a 32-byte digest.
///
/// Implementations must be deterministic and return `None` for anything they cannot recover,
/// never a placeholder address.
pub trait SignerRecovery {
    fn recover(&self, digest: FixedBytes<32>, signature: &[u8]) -> Option<Address>;
}
