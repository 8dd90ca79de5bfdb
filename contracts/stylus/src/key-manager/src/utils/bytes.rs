//! Checked fixed-offset readers over untrusted byte strings.
//!
//! Every accessor validates the length before touching the slice and returns `None` instead of
//! panicking, so callers decide which error a short input maps to.

use stylus_sdk::alloy_primitives::{Address, U256};

pub fn slice_at(bytes: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    let end = offset.checked_add(len)?;
    bytes.get(offset..end)
}

pub fn array_at<const N: usize>(bytes: &[u8], offset: usize) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(bytes, offset, N)?);
    Some(out)
}

pub fn address_at(bytes: &[u8], offset: usize) -> Option<Address> {
    slice_at(bytes, offset, 20).map(Address::from_slice)
}

/// Big-endian 32-byte word.
pub fn u256_at(bytes: &[u8], offset: usize) -> Option<U256> {
    slice_at(bytes, offset, 32).map(U256::from_be_slice)
}
