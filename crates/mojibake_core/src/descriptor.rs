use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// True when `pair` is one UTF-16 code unit in the ASCII range.
    pub fn is_narrow_unit(self, pair: [u8; 2]) -> bool {
        let (low, high) = match self {
            ByteOrder::Little => (pair[0], pair[1]),
            ByteOrder::Big => (pair[1], pair[0]),
        };
        high == 0 && low.is_ascii()
    }

    pub fn unit_bytes(self, unit: u16) -> [u8; 2] {
        match self {
            ByteOrder::Little => unit.to_le_bytes(),
            ByteOrder::Big => unit.to_be_bytes(),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little-endian"),
            ByteOrder::Big => write!(f, "big-endian"),
        }
    }
}

/// How safe split points are located in a raw byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// A byte in 0..=127 is always a whole character.
    Ascii,
    /// Fixed 2-byte units. `None` until a BOM (or the default) settles the order.
    Wide(Option<ByteOrder>),
}

impl Alignment {
    pub fn needs_bom_check(self) -> bool {
        matches!(self, Alignment::Wide(None))
    }

    /// Size of the smallest unit a split may fall on.
    pub fn unit_len(self) -> usize {
        match self {
            Alignment::Ascii => 1,
            Alignment::Wide(_) => 2,
        }
    }

    pub fn is_wide(self) -> bool {
        matches!(self, Alignment::Wide(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_unit_respects_byte_order() {
        assert!(ByteOrder::Little.is_narrow_unit([b'a', 0]));
        assert!(!ByteOrder::Little.is_narrow_unit([0, b'a']));
        assert!(ByteOrder::Big.is_narrow_unit([0, b'a']));
        assert!(!ByteOrder::Big.is_narrow_unit([b'a', 0]));
        assert!(!ByteOrder::Little.is_narrow_unit([0xD6, 0]));
    }

    #[test]
    fn only_unresolved_wide_needs_bom_check() {
        assert!(Alignment::Wide(None).needs_bom_check());
        assert!(!Alignment::Wide(Some(ByteOrder::Big)).needs_bom_check());
        assert!(!Alignment::Ascii.needs_bom_check());
        assert_eq!(Alignment::Ascii.unit_len(), 1);
        assert_eq!(Alignment::Wide(None).unit_len(), 2);
    }
}
