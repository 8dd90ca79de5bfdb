//! Permission-checking key manager for an ERC725-style identity account.
//!
//! A key manager owns an account and decides, per controller address, which encoded calls it
//! may have the account perform. Permissions and allow-lists live in the account's own
//! key/value store; the key manager keeps only relay nonces.
//!
//! - [`decoder`] classifies a payload into an [`types::ActionView`];
//! - [`policy`] maps that view to required capabilities and allow-list entries;
//! - [`gateway`] runs the whole flow over pluggable account, nonce and signature backends;
//! - [`key_manager`] is the Stylus contract wiring those backends to chain state.

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
extern crate alloc;

pub mod account;
pub mod decoder;
pub mod errors;
pub mod gateway;
pub mod key_manager;
pub mod nonce;
pub mod permission_store;
pub mod policy;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use key_manager::KeyManager;
