use alloy_primitives::{Address, U256};

/// Four-byte function selector.
pub type Selector = [u8; 4];

/// Operation kinds understood by the account's `execute` entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum OperationType {
    Call = 0,
    DelegateCall = 1,
    Create2 = 2,
    Create = 3,
}

impl OperationType {
    pub const fn is_deploy(self) -> bool {
        matches!(self, Self::Create2 | Self::Create)
    }
}

impl TryFrom<u8> for OperationType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use OperationType::*;
        let op = match value {
            0 => Call,
            1 => DelegateCall,
            2 => Create2,
            3 => Create,
            _ => return Err(()),
        };
        Ok(op)
    }
}

/// What an encoded action asks the account to do, as far as authorization cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionView {
    SetData {
        key_prefix: [u8; 8],
    },
    Execute {
        operation: OperationType,
        target: Address,
        value: U256,
        /// Selector of the nested call, present only when the payload carries one.
        inner_selector: Option<Selector>,
    },
    TransferOwnership,
    Unknown {
        selector: Selector,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_type_from_byte() {
        assert_eq!(OperationType::try_from(0), Ok(OperationType::Call));
        assert_eq!(OperationType::try_from(3), Ok(OperationType::Create));
        assert_eq!(OperationType::try_from(4), Err(()));
        assert!(OperationType::Create2.is_deploy());
        assert!(!OperationType::DelegateCall.is_deploy());
    }
}
