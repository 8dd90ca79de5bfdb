//! Permission policy: which capability and allow-list entries an action needs.
//!
//! The table is expressed as data. [`requirements`] lists, in evaluation order, everything an
//! action needs and [`authorize`] walks that list, returning the first unmet requirement.

use alloc::{vec, vec::Vec};

use stylus_sdk::alloy_primitives::{Address, U256};

use crate::{
    errors::DenialReason,
    types::{ActionView, OperationType, Permissions, Selector, ADDRESS_PERMISSIONS_PREFIX},
};

/// Capability required per `execute` operation type, indexed by the operation byte.
/// create and create2 share DEPLOY.
const OPERATION_PERMISSIONS: [Permissions; 4] = [
    Permissions::CALL,
    Permissions::DELEGATECALL,
    Permissions::DEPLOY,
    Permissions::DEPLOY,
];

/// Restrictions configured for a controller on top of its permission bits.
///
/// An empty list means "no restriction configured", never "nothing allowed".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowLists {
    pub addresses: Vec<Address>,
    pub functions: Vec<Selector>,
}

impl AllowLists {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn allows_address(&self, target: Address) -> bool {
        self.addresses.is_empty() || self.addresses.contains(&target)
    }

    pub fn allows_function(&self, selector: Selector) -> bool {
        self.functions.is_empty() || self.functions.contains(&selector)
    }
}

/// A single condition an action must satisfy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Capability(Permissions),
    AllowedTarget(Address),
    AllowedFunction(Selector),
}

pub fn operation_permission(operation: OperationType) -> Permissions {
    OPERATION_PERMISSIONS[operation as usize]
}

/// Requirements of `action` in evaluation order.
pub fn requirements(action: &ActionView) -> Result<Vec<Requirement>, DenialReason> {
    let reqs = match action {
        ActionView::SetData { key_prefix } => {
            if *key_prefix == ADDRESS_PERMISSIONS_PREFIX {
                vec![Requirement::Capability(Permissions::CHANGE_KEYS)]
            } else {
                vec![Requirement::Capability(Permissions::SET_DATA)]
            }
        },
        ActionView::Execute {
            operation,
            target,
            value,
            inner_selector,
        } => {
            let mut reqs = vec![
                Requirement::Capability(operation_permission(*operation)),
                Requirement::AllowedTarget(*target),
            ];
            if *value > U256::ZERO {
                reqs.push(Requirement::Capability(Permissions::TRANSFER_VALUE));
            }
            if let Some(selector) = inner_selector {
                reqs.push(Requirement::AllowedFunction(*selector));
            }
            reqs
        },
        ActionView::TransferOwnership => vec![Requirement::Capability(Permissions::CHANGE_OWNER)],
        ActionView::Unknown { selector } => return Err(DenialReason::UnknownSelector(*selector)),
    };
    Ok(reqs)
}

/// Decide whether a controller holding `permissions` and `allow_lists` may perform `action`.
pub fn authorize(
    permissions: Permissions,
    allow_lists: &AllowLists,
    action: &ActionView,
) -> Result<(), DenialReason> {
    for requirement in requirements(action)? {
        match requirement {
            Requirement::Capability(capability) => {
                if !permissions.contains(capability) {
                    return Err(DenialReason::NotAuthorized(capability));
                }
            },
            Requirement::AllowedTarget(target) => {
                if !allow_lists.allows_address(target) {
                    return Err(DenialReason::TargetNotAllowed(target));
                }
            },
            Requirement::AllowedFunction(selector) => {
                if !allow_lists.allows_function(selector) {
                    return Err(DenialReason::FunctionNotAllowed(selector));
                }
            },
        }
    }
    Ok(())
}
