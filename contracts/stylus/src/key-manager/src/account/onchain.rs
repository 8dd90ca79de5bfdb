use alloc::vec::Vec;

use alloy_sol_types::SolCall;
use stylus_sdk::{
    alloy_primitives::{Address, FixedBytes, U256},
    call::RawCall,
};

use crate::{
    account::interfaces::IERC725Y,
    types::{Account, AccountError, DispatchResult},
};

/// Account backend that reaches the gated contract with raw calls.
#[derive(Clone, Copy, Debug)]
pub struct OnchainAccount {
    pub address: Address,
}

impl OnchainAccount {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl Account for OnchainAccount {
    fn get_data(&self, key: FixedBytes<32>) -> Result<Vec<u8>, AccountError> {
        let call = IERC725Y::getDataCall { dataKey: key };
        let out = unsafe { RawCall::new_static().call(self.address, &call.abi_encode()) }
            .map_err(|_| AccountError::CallFailed)?;
        let decoded = IERC725Y::getDataCall::abi_decode_returns(&out, true)
            .map_err(|_| AccountError::MalformedReturn)?;
        Ok(decoded.dataValue.to_vec())
    }

    fn dispatch(&mut self, payload: &[u8], value: U256) -> DispatchResult {
        // The payload has already been authorized; forward it byte-for-byte.
        match unsafe { RawCall::new_with_value(value).call(self.address, payload) } {
            Ok(return_data) => DispatchResult {
                success: true,
                return_data,
            },
            Err(return_data) => DispatchResult {
                success: false,
                return_data,
            },
        }
    }
}
