//! The identity account the key manager sits in front of.
//!
//! This module keeps the account's ABI (selectors, interfaces, ERC-1271 constants) and the
//! on-chain `Account` backend apart from the authorization logic.

pub mod constants;
pub mod interfaces;
pub mod onchain;
