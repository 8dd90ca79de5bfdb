//! Selectors and return codes of the account ABI.

use alloy_sol_types::SolCall;

use crate::{
    account::interfaces::{IERC1271, IERC725X, IERC725Y, IOwnable},
    types::Selector,
};

/// `setData(bytes32,bytes)`
pub const SET_DATA_SELECTOR: Selector = IERC725Y::setDataCall::SELECTOR;
/// `execute(uint256,address,uint256,bytes)`
pub const EXECUTE_SELECTOR: Selector = IERC725X::executeCall::SELECTOR;
/// `transferOwnership(address)`
pub const TRANSFER_OWNERSHIP_SELECTOR: Selector = IOwnable::transferOwnershipCall::SELECTOR;

// ERC-1271 return codes.
pub const ERC1271_MAGIC_VALUE: Selector = IERC1271::isValidSignatureCall::SELECTOR;
pub const ERC1271_FAIL_VALUE: Selector = [0xff; 4];
