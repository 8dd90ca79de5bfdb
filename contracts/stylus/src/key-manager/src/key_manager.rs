//! Stylus entrypoint of the key manager.
//!
//! The contract is bound once to the account it gates and is expected to be that account's
//! owner. Controllers either call `execute` themselves or sign a payload that anyone may submit
//! through `executeRelayCall`. Every payload is checked against the controller's permission
//! data, read live from the account, before being forwarded verbatim.
//!
//! Storage holds only the bound account and the relay nonce ledger; permissions always come from
//! the account.

use alloc::string::ToString;

use alloy_sol_types::sol;
use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, FixedBytes, U256},
    prelude::*,
    storage::{StorageMap, StorageU256},
    stylus_core::log,
    stylus_proc::SolidityError,
};

use crate::{
    account::{
        constants::{ERC1271_FAIL_VALUE, ERC1271_MAGIC_VALUE},
        onchain::OnchainAccount,
    },
    errors::{DecodeError, DenialReason, KeyManagerError},
    gateway::{is_valid_signature, ExecutionOutcome, Gateway},
    nonce::NonceLedger,
    utils::crypto::Ecrecover,
};

sol! {
    event Executed(uint256 indexed value, bytes4 selector);
    event NonceConsumed(address indexed signer, uint128 indexed channel, uint128 counter);

    error AlreadyInitialized(address account);
    error NotInitialized();
    error InvalidAccount(address account);
    error NoPermissionsSet(address from);
    error NotAuthorised(address from, string permission);
    error NotAllowedAddress(address from, address disallowedAddress);
    error NotAllowedFunction(address from, bytes4 disallowedFunction);
    error InvalidERC725Function(bytes4 invalidFunction);
    error InvalidOperationType(uint256 operationType);
    error MalformedPayload();
    error MalformedAllowList(address from);
    error InvalidRelayNonce(address signer, uint256 nonce);
    error InvalidRelaySignature();
    error WrongRecipientContract(address signedFor);
    error AccountUnavailable();
}

#[derive(SolidityError)]
pub enum KeyManagerRevert {
    AlreadyInitialized(AlreadyInitialized),
    NotInitialized(NotInitialized),
    InvalidAccount(InvalidAccount),
    NoPermissionsSet(NoPermissionsSet),
    NotAuthorised(NotAuthorised),
    NotAllowedAddress(NotAllowedAddress),
    NotAllowedFunction(NotAllowedFunction),
    InvalidERC725Function(InvalidERC725Function),
    InvalidOperationType(InvalidOperationType),
    MalformedPayload(MalformedPayload),
    MalformedAllowList(MalformedAllowList),
    InvalidRelayNonce(InvalidRelayNonce),
    InvalidRelaySignature(InvalidRelaySignature),
    WrongRecipientContract(WrongRecipientContract),
    AccountUnavailable(AccountUnavailable),
}

impl From<KeyManagerError> for KeyManagerRevert {
    fn from(err: KeyManagerError) -> Self {
        match err {
            KeyManagerError::NoPermissionsSet(from) => {
                Self::NoPermissionsSet(NoPermissionsSet { from })
            },
            KeyManagerError::MalformedPayload(DecodeError::Truncated) => {
                Self::MalformedPayload(MalformedPayload {})
            },
            KeyManagerError::MalformedPayload(DecodeError::InvalidOperationType(word)) => {
                Self::InvalidOperationType(InvalidOperationType {
                    operationType: word,
                })
            },
            KeyManagerError::MalformedAllowList(from) => {
                Self::MalformedAllowList(MalformedAllowList { from })
            },
            KeyManagerError::Denied {
                controller: from,
                reason,
            } => match reason {
                DenialReason::NotAuthorized(permission) => Self::NotAuthorised(NotAuthorised {
                    from,
                    permission: permission.to_string(),
                }),
                DenialReason::TargetNotAllowed(target) => {
                    Self::NotAllowedAddress(NotAllowedAddress {
                        from,
                        disallowedAddress: target,
                    })
                },
                DenialReason::FunctionNotAllowed(selector) => {
                    Self::NotAllowedFunction(NotAllowedFunction {
                        from,
                        disallowedFunction: FixedBytes(selector),
                    })
                },
                DenialReason::UnknownSelector(selector) => {
                    Self::InvalidERC725Function(InvalidERC725Function {
                        invalidFunction: FixedBytes(selector),
                    })
                },
            },
            KeyManagerError::InvalidNonce { signer, nonce } => {
                Self::InvalidRelayNonce(InvalidRelayNonce { signer, nonce })
            },
            KeyManagerError::WrongRecipientContract(signed_for) => {
                Self::WrongRecipientContract(WrongRecipientContract {
                    signedFor: signed_for,
                })
            },
            KeyManagerError::InvalidSignature => {
                Self::InvalidRelaySignature(InvalidRelaySignature {})
            },
            KeyManagerError::AccountUnavailable(_) => {
                Self::AccountUnavailable(AccountUnavailable {})
            },
        }
    }
}

/// `signer => channel => counter`
type NonceStore = StorageMap<Address, StorageMap<U256, StorageU256>>;

impl NonceLedger for NonceStore {
    fn load(&self, signer: Address, channel: u128) -> u128 {
        // Counters only ever grow by one from zero, so they always fit.
        self.get(signer).get(U256::from(channel)).saturating_to()
    }

    fn store(&mut self, signer: Address, channel: u128, counter: u128) {
        self.setter(signer)
            .insert(U256::from(channel), U256::from(counter));
    }
}

sol_storage! {
    #[entrypoint]
    pub struct KeyManager {
        /// Account gated by this key manager. Zero until `initialize`.
        address account;

        /// Relay nonce ledger.
        mapping(address => mapping(uint256 => uint256)) nonce_store;
    }
}

#[public]
impl KeyManager {
    /// Bind the key manager to `account`. Can only be done once.
    pub fn initialize(&mut self, account: Address) -> Result<(), KeyManagerRevert> {
        let current = self.account.get();
        if current != Address::ZERO {
            return Err(KeyManagerRevert::AlreadyInitialized(AlreadyInitialized {
                account: current,
            }));
        }
        if account == Address::ZERO {
            return Err(KeyManagerRevert::InvalidAccount(InvalidAccount { account }));
        }
        self.account.set(account);
        Ok(())
    }

    pub fn account(&self) -> Address {
        self.account.get()
    }

    /// Composite nonce `from` must sign next in `channel_id`.
    pub fn get_nonce(&self, from: Address, channel_id: u128) -> U256 {
        self.nonce_store.get_nonce(from, channel_id)
    }

    /// Run `payload` on the account as `msg.sender`, forwarding `msg.value`.
    ///
    /// Returns the account call's success flag; authorization failures revert.
    #[payable]
    pub fn execute(&mut self, payload: Bytes) -> Result<bool, KeyManagerRevert> {
        let caller = self.vm().msg_sender();
        let value = self.vm().msg_value();

        let outcome = self.gateway()?.execute(caller, &payload, value)?;
        self.emit_outcome(&outcome);
        Ok(outcome.success)
    }

    /// Run `payload` on behalf of the controller that signed it.
    ///
    /// Relayed calls never carry value.
    pub fn execute_relay_call(
        &mut self,
        signed_for: Address,
        nonce: U256,
        payload: Bytes,
        signature: Bytes,
    ) -> Result<bool, KeyManagerRevert> {
        let outcome = self
            .gateway()?
            .execute_relayed(signed_for, nonce, &payload, &signature)?;
        self.emit_outcome(&outcome);
        Ok(outcome.success)
    }

    /// ERC-1271: valid when the signer of `hash` holds SIGN on the account.
    pub fn is_valid_signature(&self, hash: FixedBytes<32>, signature: Bytes) -> FixedBytes<4> {
        let account = self.account.get();
        if account == Address::ZERO {
            return FixedBytes(ERC1271_FAIL_VALUE);
        }
        if is_valid_signature(&OnchainAccount::new(account), &Ecrecover, hash, &signature) {
            FixedBytes(ERC1271_MAGIC_VALUE)
        } else {
            FixedBytes(ERC1271_FAIL_VALUE)
        }
    }
}

impl KeyManager {
    fn gateway(
        &mut self,
    ) -> Result<Gateway<OnchainAccount, &mut NonceStore, Ecrecover>, KeyManagerRevert> {
        let account = self.account.get();
        if account == Address::ZERO {
            return Err(KeyManagerRevert::NotInitialized(NotInitialized {}));
        }
        let address = self.vm().contract_address();
        Ok(Gateway::new(
            address,
            OnchainAccount::new(account),
            &mut self.nonce_store,
            Ecrecover,
        ))
    }

    fn emit_outcome(&self, outcome: &ExecutionOutcome) {
        if let Some(consumed) = outcome.consumed_nonce {
            log(
                self.vm(),
                NonceConsumed {
                    signer: outcome.controller,
                    channel: consumed.channel,
                    counter: consumed.counter,
                },
            );
        }
        log(
            self.vm(),
            Executed {
                value: outcome.value,
                selector: FixedBytes(outcome.selector),
            },
        );
    }
}
