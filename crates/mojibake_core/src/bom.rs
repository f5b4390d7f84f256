use crate::ByteOrder;

pub const BOM_LE: [u8; 2] = [0xFF, 0xFE];
pub const BOM_BE: [u8; 2] = [0xFE, 0xFF];

/// Byte order assumed for an unmarked UTF-16 stream.
pub const BYTE_ORDER_WITHOUT_BOM: ByteOrder = ByteOrder::Big;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomOutcome {
    /// The head was a byte-order mark and must be discarded.
    Marker(ByteOrder),
    /// The head is ordinary data and must be kept.
    Absent,
}

/// Inspect the head of a wide stream. Heads shorter than two bytes never match.
pub fn detect_bom(head: &[u8]) -> BomOutcome {
    match head {
        [0xFF, 0xFE, ..] => BomOutcome::Marker(ByteOrder::Little),
        [0xFE, 0xFF, ..] => BomOutcome::Marker(ByteOrder::Big),
        _ => BomOutcome::Absent,
    }
}
