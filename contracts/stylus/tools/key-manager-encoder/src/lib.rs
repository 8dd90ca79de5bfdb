//! Off-chain helpers for talking to the key manager.
//!
//! Builds the account payloads controllers submit, writes permission data in the exact layout the
//! contract reads, and signs relayed calls the way `executeRelayCall` verifies them.

pub mod encoder;
pub mod signer;
pub mod types;

pub use encoder::{
    encode_allowed_addresses, encode_allowed_functions, encode_execute, encode_execute_call,
    encode_execute_relay_call, encode_set_data, encode_set_permissions, encode_transfer_ownership,
    relay_digest,
};
pub use key_manager_types::{compose_nonce, decompose_nonce, OperationType, Permissions};
pub use signer::{address_of, K256Recovery, LocalSigner};
pub use types::RelayCall;
