//! Reads a controller's permissions and allow-lists from the account's key/value store.
//!
//! The two kinds of lookup treat "no data" in opposite ways:
//! - no permissions value means the controller does not exist: [`get_permissions`] fails with
//!   `NoPermissionsSet`, it never falls back to a default mask;
//! - no allow-list value means no restriction was configured: the list decodes as empty, which
//!   the policy reads as unrestricted.

use alloc::vec::Vec;

use alloy_sol_types::SolValue;
use stylus_sdk::alloy_primitives::{Address, FixedBytes};

use crate::{
    errors::KeyManagerError,
    policy::AllowLists,
    types::{
        allowed_addresses_key, allowed_functions_key, permissions_key, Account, Permissions,
        Selector,
    },
};

pub fn get_permissions<A: Account + ?Sized>(
    account: &A,
    controller: Address,
) -> Result<Permissions, KeyManagerError> {
    let raw = account.get_data(permissions_key(controller))?;
    Permissions::from_stored(&raw).ok_or(KeyManagerError::NoPermissionsSet(controller))
}

/// ABI-encoded `address[]`.
pub fn get_allowed_addresses<A: Account + ?Sized>(
    account: &A,
    controller: Address,
) -> Result<Vec<Address>, KeyManagerError> {
    let raw = account.get_data(allowed_addresses_key(controller))?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    Vec::<Address>::abi_decode(&raw, true)
        .map_err(|_| KeyManagerError::MalformedAllowList(controller))
}

/// ABI-encoded `bytes4[]`.
pub fn get_allowed_functions<A: Account + ?Sized>(
    account: &A,
    controller: Address,
) -> Result<Vec<Selector>, KeyManagerError> {
    let raw = account.get_data(allowed_functions_key(controller))?;
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    let selectors = Vec::<FixedBytes<4>>::abi_decode(&raw, true)
        .map_err(|_| KeyManagerError::MalformedAllowList(controller))?;
    Ok(selectors.into_iter().map(|selector| selector.0).collect())
}

pub fn get_allow_lists<A: Account + ?Sized>(
    account: &A,
    controller: Address,
) -> Result<AllowLists, KeyManagerError> {
    Ok(AllowLists {
        addresses: get_allowed_addresses(account, controller)?,
        functions: get_allowed_functions(account, controller)?,
    })
}
