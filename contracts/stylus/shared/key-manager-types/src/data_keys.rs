//! Data keys under which the account stores controller permissions.
//!
//! Layout: `AddressPermissions namespace (8) ++ sub-namespace (2) ++ 0x0000 ++ address (20)`.

use alloy_primitives::{Address, FixedBytes};

/// Namespace shared by every permission-related data key.
///
/// Writing any key that starts with these bytes changes someone's permissions.
pub const ADDRESS_PERMISSIONS_PREFIX: [u8; 8] = [0x4b, 0x80, 0x74, 0x2d, 0x00, 0x00, 0x00, 0x00];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionNamespace {
    Permissions,
    AllowedAddresses,
    AllowedFunctions,
}

impl PermissionNamespace {
    const fn marker(self) -> [u8; 2] {
        match self {
            Self::Permissions => [0x82, 0xac],
            Self::AllowedAddresses => [0xc6, 0xdd],
            Self::AllowedFunctions => [0x8e, 0xfe],
        }
    }

    /// The 12-byte prefix the controller address is appended to.
    pub const fn prefix(self) -> [u8; 12] {
        let marker = self.marker();
        let mut out = [0u8; 12];
        let mut i = 0;
        while i < 8 {
            out[i] = ADDRESS_PERMISSIONS_PREFIX[i];
            i += 1;
        }
        out[8] = marker[0];
        out[9] = marker[1];
        out
    }

    pub fn key_for(self, controller: Address) -> FixedBytes<32> {
        let mut key = [0u8; 32];
        key[..12].copy_from_slice(&self.prefix());
        key[12..].copy_from_slice(controller.as_slice());
        FixedBytes(key)
    }
}

pub fn permissions_key(controller: Address) -> FixedBytes<32> {
    PermissionNamespace::Permissions.key_for(controller)
}

pub fn allowed_addresses_key(controller: Address) -> FixedBytes<32> {
    PermissionNamespace::AllowedAddresses.key_for(controller)
}

pub fn allowed_functions_key(controller: Address) -> FixedBytes<32> {
    PermissionNamespace::AllowedFunctions.key_for(controller)
}
