use stylus_sdk::alloy_primitives::{Address, U256};

use crate::types::{Permissions, Selector};

/// Errors while classifying an encoded action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The payload is shorter than the fixed fields its selector requires.
    Truncated,
    /// The `operationType` word of an `execute` payload is not 0..=3.
    InvalidOperationType(U256),
}

/// Errors during fact acquisition from the account.
pub use crate::types::AccountError;

/// Why the policy refused an action. Only the first failing check is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    NotAuthorized(Permissions),
    TargetNotAllowed(Address),
    FunctionNotAllowed(Selector),
    UnknownSelector(Selector),
}

/// Everything that can abort a key manager entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyManagerError {
    NoPermissionsSet(Address),
    MalformedPayload(DecodeError),
    MalformedAllowList(Address),
    Denied {
        controller: Address,
        reason: DenialReason,
    },
    InvalidNonce {
        signer: Address,
        nonce: U256,
    },
    WrongRecipientContract(Address),
    InvalidSignature,
    AccountUnavailable(AccountError),
}

impl From<DecodeError> for KeyManagerError {
    fn from(err: DecodeError) -> Self {
        Self::MalformedPayload(err)
    }
}

impl From<AccountError> for KeyManagerError {
    fn from(err: AccountError) -> Self {
        Self::AccountUnavailable(err)
    }
}
