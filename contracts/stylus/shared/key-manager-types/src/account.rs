use alloc::vec::Vec;

use alloy_primitives::{Address, FixedBytes, U256};

/// Errors surfaced by an account backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountError {
    /// Used by off-chain mocks or partially implemented backends.
    NotImplemented,
    /// The underlying call failed.
    CallFailed,
    /// Return data was malformed or could not be decoded.
    MalformedReturn,
}

/// Outcome of forwarding an encoded action to the account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub success: bool,
    pub return_data: Vec<u8>,
}

/// The identity contract gated by the key manager, implemented differently on-chain vs off-chain.
///
/// An empty `get_data` result means the key is absent.
pub trait Account {
    fn get_data(&self, key: FixedBytes<32>) -> Result<Vec<u8>, AccountError>;

    /// Forward an already-authorized encoded action verbatim, attaching `value`.
    fn dispatch(&mut self, payload: &[u8], value: U256) -> DispatchResult;

    /// Direct writes for off-chain simulators; the contract only ever uses `dispatch`.
    fn set_data(
        &mut self,
        _keys: &[FixedBytes<32>],
        _values: &[Vec<u8>],
    ) -> Result<(), AccountError> {
        Err(AccountError::NotImplemented)
    }

    fn transfer_ownership(&mut self, _new_owner: Address) -> Result<(), AccountError> {
        Err(AccountError::NotImplemented)
    }
}
