//! Key manager entry points, independent of where state lives.
//!
//! [`Gateway`] ties the permission store, the action decoder, the policy and the nonce ledger
//! together. The Stylus contract instantiates it over on-chain storage and raw calls; tests and
//! off-chain simulators instantiate it over in-memory backends.

use alloc::vec::Vec;

use stylus_sdk::alloy_primitives::{Address, FixedBytes, U256};

use crate::{
    decoder::decode_action,
    errors::KeyManagerError,
    nonce::NonceLedger,
    permission_store::{get_allow_lists, get_permissions},
    policy::{authorize, AllowLists},
    types::{decompose_nonce, Account, ActionView, Permissions, Selector, SignerRecovery},
    utils::{bytes::array_at, relay::relay_digest},
};

/// Nonce slot burned by a relayed action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsumedNonce {
    pub channel: u128,
    /// Counter value after consumption.
    pub counter: u128,
}

/// Result of an authorized action that reached the account.
///
/// `success` is the account's own verdict; authorization failures never produce an outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub controller: Address,
    pub selector: Selector,
    pub value: U256,
    pub success: bool,
    pub return_data: Vec<u8>,
    pub consumed_nonce: Option<ConsumedNonce>,
}

pub struct Gateway<A, N, R> {
    /// Address of this key manager, bound into every relay signature.
    pub address: Address,
    pub account: A,
    pub nonces: N,
    pub recovery: R,
}

impl<A: Account, N: NonceLedger, R: SignerRecovery> Gateway<A, N, R> {
    pub fn new(address: Address, account: A, nonces: N, recovery: R) -> Self {
        Self {
            address,
            account,
            nonces,
            recovery,
        }
    }

    pub fn get_nonce(&self, signer: Address, channel: u128) -> U256 {
        self.nonces.get_nonce(signer, channel)
    }

    /// Decide whether `controller` may have the account run `payload`.
    ///
    /// Order: permissions lookup, decode, allow-lists (only for `execute`), policy.
    pub fn authorize(
        &self,
        controller: Address,
        payload: &[u8],
    ) -> Result<ActionView, KeyManagerError> {
        let permissions = get_permissions(&self.account, controller)?;
        let action = decode_action(payload)?;
        let allow_lists = match action {
            ActionView::Execute { .. } => get_allow_lists(&self.account, controller)?,
            _ => AllowLists::unrestricted(),
        };
        authorize(permissions, &allow_lists, &action)
            .map_err(|reason| KeyManagerError::Denied { controller, reason })?;
        Ok(action)
    }

    /// Direct execution by `caller`, forwarding `value` to the account.
    pub fn execute(
        &mut self,
        caller: Address,
        payload: &[u8],
        value: U256,
    ) -> Result<ExecutionOutcome, KeyManagerError> {
        self.authorize(caller, payload)?;
        Ok(self.forward(caller, payload, value, None))
    }

    /// Execution on behalf of whoever signed `(self.address, payload, nonce)`.
    ///
    /// The nonce is consumed only once the action is authorized, and stays consumed even when
    /// the account then fails the call.
    pub fn execute_relayed(
        &mut self,
        signed_for: Address,
        nonce: U256,
        payload: &[u8],
        signature: &[u8],
    ) -> Result<ExecutionOutcome, KeyManagerError> {
        if signed_for != self.address {
            return Err(KeyManagerError::WrongRecipientContract(signed_for));
        }

        let digest = relay_digest(self.address, payload, nonce);
        let signer = self
            .recovery
            .recover(digest, signature)
            .ok_or(KeyManagerError::InvalidSignature)?;

        let (channel, _) = decompose_nonce(nonce);
        self.nonces.ensure_current(signer, channel, nonce)?;
        self.authorize(signer, payload)?;
        let counter = self.nonces.validate_and_consume(signer, channel, nonce)?;

        Ok(self.forward(
            signer,
            payload,
            U256::ZERO,
            Some(ConsumedNonce { channel, counter }),
        ))
    }

    pub fn is_valid_signature(&self, hash: FixedBytes<32>, signature: &[u8]) -> bool {
        is_valid_signature(&self.account, &self.recovery, hash, signature)
    }

    fn forward(
        &mut self,
        controller: Address,
        payload: &[u8],
        value: U256,
        consumed_nonce: Option<ConsumedNonce>,
    ) -> ExecutionOutcome {
        let result = self.account.dispatch(payload, value);
        ExecutionOutcome {
            controller,
            selector: array_at(payload, 0).unwrap_or_default(),
            value,
            success: result.success,
            return_data: result.return_data,
            consumed_nonce,
        }
    }
}

/// ERC-1271 style check: the signer of `hash` must hold SIGN on the account.
///
/// Unrecoverable signatures, unknown signers and unreadable storage all answer `false`.
pub fn is_valid_signature<A: Account + ?Sized, R: SignerRecovery + ?Sized>(
    account: &A,
    recovery: &R,
    hash: FixedBytes<32>,
    signature: &[u8],
) -> bool {
    let Some(signer) = recovery.recover(hash, signature) else {
        return false;
    };
    matches!(
        get_permissions(account, signer),
        Ok(permissions) if permissions.contains(Permissions::SIGN)
    )
}
