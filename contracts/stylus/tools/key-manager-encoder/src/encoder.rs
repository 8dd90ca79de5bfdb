use alloy_primitives::{Address, Bytes, FixedBytes, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use key_manager_types::{
    allowed_addresses_key, allowed_functions_key, permissions_key, OperationType, Permissions,
    Selector,
};
use sha3::{Digest, Keccak256};

use crate::types::RelayCall;

sol! {
    interface IAccount {
        function setData(bytes32 dataKey, bytes memory dataValue) external payable;
        function execute(uint256 operationType, address target, uint256 value, bytes memory data)
            external
            payable
            returns (bytes memory);
        function transferOwnership(address newOwner) external;
    }

    interface IKeyManager {
        function execute(bytes memory payload) external payable returns (bool);
        function executeRelayCall(address signedFor, uint256 nonce, bytes memory payload, bytes memory signature)
            external
            returns (bool);
    }
}

/// `setData(key, value)` on the account.
pub fn encode_set_data(key: FixedBytes<32>, value: &[u8]) -> Vec<u8> {
    IAccount::setDataCall {
        dataKey: key,
        dataValue: Bytes::copy_from_slice(value),
    }
    .abi_encode()
}

/// `execute(operation, target, value, data)` on the account.
pub fn encode_execute(operation: OperationType, target: Address, value: U256, data: &[u8]) -> Vec<u8> {
    IAccount::executeCall {
        operationType: U256::from(operation as u8),
        target,
        value,
        data: Bytes::copy_from_slice(data),
    }
    .abi_encode()
}

pub fn encode_transfer_ownership(new_owner: Address) -> Vec<u8> {
    IAccount::transferOwnershipCall { newOwner: new_owner }.abi_encode()
}

/// Grant `permissions` to `controller`. The mask is stored as a single byte.
pub fn encode_set_permissions(controller: Address, permissions: Permissions) -> Vec<u8> {
    encode_set_data(permissions_key(controller), &[permissions.bits()])
}

/// Restrict `controller` to `addresses`; an empty slice removes the restriction.
pub fn encode_allowed_addresses(controller: Address, addresses: &[Address]) -> Vec<u8> {
    let value = if addresses.is_empty() {
        Vec::new()
    } else {
        addresses.to_vec().abi_encode()
    };
    encode_set_data(allowed_addresses_key(controller), &value)
}

/// Restrict `controller` to `selectors`; an empty slice removes the restriction.
pub fn encode_allowed_functions(controller: Address, selectors: &[Selector]) -> Vec<u8> {
    let value = if selectors.is_empty() {
        Vec::new()
    } else {
        selectors
            .iter()
            .map(|selector| FixedBytes::<4>(*selector))
            .collect::<Vec<_>>()
            .abi_encode()
    };
    encode_set_data(allowed_functions_key(controller), &value)
}

/// Key manager calldata for a direct `execute(payload)`.
pub fn encode_execute_call(payload: &[u8]) -> Vec<u8> {
    IKeyManager::executeCall {
        payload: Bytes::copy_from_slice(payload),
    }
    .abi_encode()
}

/// Key manager calldata a relayer submits for a signed [`RelayCall`].
pub fn encode_execute_relay_call(call: &RelayCall) -> Vec<u8> {
    IKeyManager::executeRelayCallCall {
        signedFor: call.key_manager,
        nonce: call.nonce,
        payload: Bytes::copy_from_slice(&call.payload),
        signature: Bytes::copy_from_slice(&call.signature),
    }
    .abi_encode()
}

pub(crate) fn keccak256_bytes(bytes: &[u8]) -> FixedBytes<32> {
    let mut h = Keccak256::new();
    h.update(bytes);
    let out = h.finalize();
    let mut b = [0u8; 32];
    b.copy_from_slice(out.as_slice());
    FixedBytes(b)
}

/// Compute the relay digest (must match the contract's `relay_digest`).
pub fn relay_digest(key_manager: Address, payload: &[u8], nonce: U256) -> FixedBytes<32> {
    let mut message = Vec::with_capacity(20 + payload.len() + 32);
    message.extend_from_slice(key_manager.as_slice());
    message.extend_from_slice(payload);
    message.extend_from_slice(&nonce.to_be_bytes::<32>());
    let message_hash = keccak256_bytes(&message);

    let mut final_buf = Vec::with_capacity(28 + 32);
    final_buf.extend_from_slice(b"\x19Ethereum Signed Message:\n32");
    final_buf.extend_from_slice(message_hash.as_slice());
    keccak256_bytes(&final_buf)
}
