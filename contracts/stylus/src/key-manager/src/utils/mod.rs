//! Byte readers, signature recovery and relay digests used by the key manager.

pub mod bytes;
pub mod crypto;
pub mod relay;
