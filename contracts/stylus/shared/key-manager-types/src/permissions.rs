use core::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign},
};

/// Capability flags held by a controller address, one bit per capability.
///
/// Bit positions are part of the account storage format and must never be renumbered.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Permissions(u8);

impl Permissions {
    pub const NONE: Self = Self(0x00);
    pub const CHANGE_OWNER: Self = Self(0x01);
    pub const CHANGE_KEYS: Self = Self(0x02);
    pub const SET_DATA: Self = Self(0x04);
    pub const CALL: Self = Self(0x08);
    pub const DELEGATECALL: Self = Self(0x10);
    pub const DEPLOY: Self = Self(0x20);
    pub const TRANSFER_VALUE: Self = Self(0x40);
    pub const SIGN: Self = Self(0x80);
    pub const ALL: Self = Self(0xff);

    const NAMED: [(Self, &'static str); 8] = [
        (Self::CHANGE_OWNER, "CHANGE_OWNER"),
        (Self::CHANGE_KEYS, "CHANGE_KEYS"),
        (Self::SET_DATA, "SET_DATA"),
        (Self::CALL, "CALL"),
        (Self::DELEGATECALL, "DELEGATECALL"),
        (Self::DEPLOY, "DEPLOY"),
        (Self::TRANSFER_VALUE, "TRANSFER_VALUE"),
        (Self::SIGN, "SIGN"),
    ];

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `required` is also set in `self`.
    pub const fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Decode a raw value read from the account's permissions data key.
    ///
    /// The value is a big-endian byte string and the mask is its lowest-order byte. An empty
    /// value means the address has no permissions entry at all, which is reported as `None`
    /// rather than an empty mask so callers cannot mistake it for a configured controller.
    pub fn from_stored(value: &[u8]) -> Option<Self> {
        value.last().map(|bits| Self(*bits))
    }

    /// Name of a single capability flag, as used in revert messages.
    pub fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, name)| *name)
    }
}

impl BitOr for Permissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Permissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Permissions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permissions({:#04x}: {})", self.0, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_subset_test() {
        let granted = Permissions::SET_DATA | Permissions::CALL;
        assert_eq!(granted.bits(), 0x0c);
        assert!(granted.contains(Permissions::CALL));
        assert!(granted.contains(Permissions::SET_DATA | Permissions::CALL));
        assert!(!granted.contains(Permissions::CALL | Permissions::DELEGATECALL));
        assert!(granted.contains(Permissions::NONE));
    }

    #[test]
    fn test_from_stored_uses_lowest_order_byte() {
        assert_eq!(Permissions::from_stored(&[]), None);
        assert_eq!(Permissions::from_stored(&[0x08]), Some(Permissions::CALL));

        let mut word = [0u8; 32];
        word[31] = 0x81;
        assert_eq!(
            Permissions::from_stored(&word),
            Some(Permissions::SIGN | Permissions::CHANGE_OWNER)
        );
    }

    #[test]
    fn test_stored_zero_is_present_but_empty() {
        let perms = Permissions::from_stored(&[0x00]).unwrap();
        assert!(perms.is_empty());
    }

    #[test]
    fn test_names_and_display() {
        assert_eq!(Permissions::DELEGATECALL.name(), Some("DELEGATECALL"));
        assert_eq!((Permissions::CALL | Permissions::SIGN).name(), None);
        assert_eq!(
            (Permissions::SET_DATA | Permissions::CALL).to_string(),
            "SET_DATA | CALL"
        );
        assert_eq!(Permissions::NONE.to_string(), "NONE");
    }
}
