//! Shared types for permissions, decoded actions, data keys and relay nonces.

pub use key_manager_types::{
    allowed_addresses_key, allowed_functions_key, compose_nonce, decompose_nonce,
    permissions_key, Account, AccountError, ActionView, DispatchResult, OperationType,
    PermissionNamespace, Permissions, Selector, SignerRecovery, ADDRESS_PERMISSIONS_PREFIX,
};
