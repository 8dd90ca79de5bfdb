//! Types shared by the key manager contract and its off-chain tooling.
//!
//! Everything in here is bit-exact with what the contract reads from and writes to the account,
//! so relayers and tests can build payloads, data keys and nonces without linking the contract.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod account;
pub mod action;
pub mod data_keys;
pub mod nonce;
pub mod permissions;
pub mod signer;

pub use account::{Account, AccountError, DispatchResult};
pub use action::{ActionView, OperationType, Selector};
pub use data_keys::{
    allowed_addresses_key, allowed_functions_key, permissions_key, PermissionNamespace,
    ADDRESS_PERMISSIONS_PREFIX,
};
pub use nonce::{compose_nonce, decompose_nonce};
pub use permissions::Permissions;
pub use signer::SignerRecovery;
