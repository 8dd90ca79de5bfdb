//! In-memory account backend for unit tests.

use alloc::{collections::BTreeMap, vec::Vec};

use alloy_sol_types::{SolCall, SolValue};
use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    account::interfaces::{IERC725Y, IOwnable},
    types::{
        allowed_addresses_key, allowed_functions_key, permissions_key, Account, AccountError,
        DispatchResult, Permissions, Selector,
    },
};

#[derive(Clone, Debug, Default)]
pub struct MemoryAccount {
    data: BTreeMap<FixedBytes<32>, Vec<u8>>,
    pub owner: Address,
    /// Every forwarded `(payload, value)`, in order.
    pub dispatched: Vec<(Vec<u8>, U256)>,
    reject_dispatch: bool,
    unavailable: bool,
}

impl MemoryAccount {
    pub fn with_permissions(mut self, controller: Address, permissions: Permissions) -> Self {
        self.put(permissions_key(controller), vec![permissions.bits()]);
        self
    }

    pub fn with_allowed_addresses(mut self, controller: Address, addresses: &[Address]) -> Self {
        self.put(allowed_addresses_key(controller), addresses.to_vec().abi_encode());
        self
    }

    pub fn with_allowed_functions(mut self, controller: Address, selectors: &[Selector]) -> Self {
        let selectors: Vec<FixedBytes<4>> = selectors.iter().map(|s| FixedBytes(*s)).collect();
        self.put(allowed_functions_key(controller), selectors.abi_encode());
        self
    }

    /// Every dispatched call fails with `"rejected"` as revert data.
    pub fn rejecting_dispatch(mut self) -> Self {
        self.reject_dispatch = true;
        self
    }

    /// Every read fails as if the account could not be reached.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn put(&mut self, key: FixedBytes<32>, value: Vec<u8>) {
        self.data.insert(key, value);
    }

    pub fn data(&self, key: FixedBytes<32>) -> Vec<u8> {
        self.data.get(&key).cloned().unwrap_or_default()
    }
}

impl Account for MemoryAccount {
    fn get_data(&self, key: FixedBytes<32>) -> Result<Vec<u8>, AccountError> {
        if self.unavailable {
            return Err(AccountError::CallFailed);
        }
        Ok(self.data(key))
    }

    fn dispatch(&mut self, payload: &[u8], value: U256) -> DispatchResult {
        self.dispatched.push((payload.to_vec(), value));
        if self.reject_dispatch {
            return DispatchResult {
                success: false,
                return_data: b"rejected".to_vec(),
            };
        }

        let applied = if let Ok(call) = IERC725Y::setDataCall::abi_decode(payload, true) {
            self.set_data(&[call.dataKey], &[call.dataValue.to_vec()])
        } else if let Ok(call) = IOwnable::transferOwnershipCall::abi_decode(payload, true) {
            self.transfer_ownership(call.newOwner)
        } else {
            Ok(())
        };
        DispatchResult {
            success: applied.is_ok(),
            return_data: Vec::new(),
        }
    }

    fn set_data(&mut self, keys: &[FixedBytes<32>], values: &[Vec<u8>]) -> Result<(), AccountError> {
        for (key, value) in keys.iter().zip(values) {
            self.put(*key, value.clone());
        }
        Ok(())
    }

    fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), AccountError> {
        self.owner = new_owner;
        Ok(())
    }
}
