use stylus_sdk::alloy_primitives::U256;

use crate::{
    account::constants::{EXECUTE_SELECTOR, SET_DATA_SELECTOR, TRANSFER_OWNERSHIP_SELECTOR},
    errors::DecodeError,
    types::{ActionView, OperationType, Selector},
    utils::bytes::{address_at, array_at, u256_at},
};

/// Byte offsets into the account's call encoding.
///
/// `execute(uint256 operationType, address target, uint256 value, bytes data)` is laid out as
/// `selector | operationType | target | value | data offset | data length | data...`.
pub mod offsets {
    pub const SELECTOR: usize = 0;
    /// First 8 bytes of the `bytes32 dataKey` argument of `setData`.
    pub const SET_DATA_KEY_PREFIX: usize = 4;
    pub const EXECUTE_OPERATION_WORD: usize = 4;
    /// Low byte of the `operationType` word.
    pub const EXECUTE_OPERATION: usize = 35;
    /// Low 20 bytes of the `target` word.
    pub const EXECUTE_TARGET: usize = 48;
    pub const EXECUTE_VALUE: usize = 68;
    /// Start of the nested call data, after its offset and length words.
    pub const EXECUTE_INNER_SELECTOR: usize = 164;
}

/// Classify an encoded account call.
///
/// Selectors other than `setData`, `execute` and `transferOwnership` decode as
/// [`ActionView::Unknown`]; rejecting them is the policy's job.
pub fn decode_action(payload: &[u8]) -> Result<ActionView, DecodeError> {
    let selector: Selector = array_at(payload, offsets::SELECTOR).ok_or(DecodeError::Truncated)?;

    let action = match selector {
        SET_DATA_SELECTOR => {
            let key_prefix =
                array_at(payload, offsets::SET_DATA_KEY_PREFIX).ok_or(DecodeError::Truncated)?;
            ActionView::SetData { key_prefix }
        },
        EXECUTE_SELECTOR => decode_execute(payload)?,
        TRANSFER_OWNERSHIP_SELECTOR => ActionView::TransferOwnership,
        _ => ActionView::Unknown { selector },
    };
    Ok(action)
}

fn decode_execute(payload: &[u8]) -> Result<ActionView, DecodeError> {
    // Only the low byte at EXECUTE_OPERATION is meaningful, but a word with any higher bit set
    // is not a valid operation either, so the whole word is range-checked.
    let word = u256_at(payload, offsets::EXECUTE_OPERATION_WORD).ok_or(DecodeError::Truncated)?;
    if word >= U256::from(4u64) {
        return Err(DecodeError::InvalidOperationType(word));
    }
    let operation = OperationType::try_from(payload[offsets::EXECUTE_OPERATION])
        .map_err(|_| DecodeError::InvalidOperationType(word))?;

    let target = address_at(payload, offsets::EXECUTE_TARGET).ok_or(DecodeError::Truncated)?;
    let value = u256_at(payload, offsets::EXECUTE_VALUE).ok_or(DecodeError::Truncated)?;

    let inner_selector = if payload.len() > offsets::EXECUTE_INNER_SELECTOR {
        Some(array_at(payload, offsets::EXECUTE_INNER_SELECTOR).ok_or(DecodeError::Truncated)?)
    } else {
        None
    };

    Ok(ActionView::Execute {
        operation,
        target,
        value,
        inner_selector,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{permissions_key, Permissions};
    use key_manager_encoder::{encode_execute, encode_set_data, encode_set_permissions, encode_transfer_ownership};
    use stylus_sdk::alloy_primitives::{address, FixedBytes};

    #[test]
    fn test_decode_execute_call_with_inner_selector() {
        let target = address!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        let inner = [0xa9, 0x05, 0x9c, 0xbb, 0x00, 0x01];
        let payload = encode_execute(OperationType::Call, target, U256::from(7u64), &inner);

        assert_eq!(
            decode_action(&payload),
            Ok(ActionView::Execute {
                operation: OperationType::Call,
                target,
                value: U256::from(7u64),
                inner_selector: Some([0xa9, 0x05, 0x9c, 0xbb]),
            })
        );
    }

    #[test]
    fn test_decode_execute_without_inner_data() {
        let target = address!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        let payload = encode_execute(OperationType::Create, target, U256::ZERO, &[]);
        // selector + 4 words + data length word, no data bytes
        assert_eq!(payload.len(), offsets::EXECUTE_INNER_SELECTOR);

        let ActionView::Execute { operation, inner_selector, .. } = decode_action(&payload).unwrap()
        else {
            panic!("expected execute");
        };
        assert_eq!(operation, OperationType::Create);
        assert_eq!(inner_selector, None);
    }

    #[test]
    fn test_decode_rejects_unknown_operation_type() {
        let target = address!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        let mut payload = encode_execute(OperationType::Call, target, U256::ZERO, &[]);
        payload[offsets::EXECUTE_OPERATION] = 4;
        assert_eq!(
            decode_action(&payload),
            Err(DecodeError::InvalidOperationType(U256::from(4u64)))
        );

        // A high bit elsewhere in the word must not alias to a valid low byte.
        let mut payload = encode_execute(OperationType::Call, target, U256::ZERO, &[]);
        payload[offsets::EXECUTE_OPERATION - 1] = 1;
        assert!(matches!(
            decode_action(&payload),
            Err(DecodeError::InvalidOperationType(_))
        ));
    }

    #[test]
    fn test_decode_set_data_prefix() {
        let controller = address!("0xcafecafecafecafecafecafecafecafecafecafe");
        let payload = encode_set_permissions(controller, Permissions::CALL);
        assert_eq!(
            decode_action(&payload),
            Ok(ActionView::SetData {
                key_prefix: [0x4b, 0x80, 0x74, 0x2d, 0, 0, 0, 0],
            })
        );
        assert_eq!(&payload[4..36], permissions_key(controller).as_slice());

        let payload = encode_set_data(FixedBytes::repeat_byte(0x11), b"hello");
        assert_eq!(
            decode_action(&payload),
            Ok(ActionView::SetData { key_prefix: [0x11; 8] })
        );
    }

    #[test]
    fn test_decode_transfer_ownership_and_unknown() {
        let payload = encode_transfer_ownership(address!("0x1111111111111111111111111111111111111111"));
        assert_eq!(decode_action(&payload), Ok(ActionView::TransferOwnership));

        assert_eq!(
            decode_action(&[0xde, 0xad, 0xbe, 0xef]),
            Ok(ActionView::Unknown { selector: [0xde, 0xad, 0xbe, 0xef] })
        );
    }

    #[test]
    fn test_decode_truncated_payloads() {
        assert_eq!(decode_action(&[]), Err(DecodeError::Truncated));
        assert_eq!(decode_action(&[0x44, 0xc0, 0x28]), Err(DecodeError::Truncated));
        assert_eq!(decode_action(&SET_DATA_SELECTOR), Err(DecodeError::Truncated));

        let target = address!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        let payload = encode_execute(OperationType::Call, target, U256::ZERO, &[]);
        assert_eq!(decode_action(&payload[..99]), Err(DecodeError::Truncated));

        // Longer than the threshold but not long enough for a whole selector.
        let mut payload = payload;
        payload.extend_from_slice(&[0xab, 0xcd]);
        assert_eq!(decode_action(&payload), Err(DecodeError::Truncated));
    }
}
