use crate::{Alignment, BYTE_ORDER_WITHOUT_BOM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error(
    "file segmentation failed: no safe split point in a segment of {capacity} bytes; \
     increase the chunk capacity"
)]
pub struct SegmentationFailed {
    pub capacity: usize,
}

/// Find the rightmost safe split offset in `chunk`.
///
/// The returned value is the length of the safe prefix: `chunk[..split]` can be
/// converted on its own and `chunk[split..]` must be carried to the next chunk.
/// A prefix always ends on a whole ASCII character (or, for wide streams, on a
/// whole narrow code unit), which can never be the lead of a longer sequence in
/// any stage of the pipeline.
///
/// Wide streams are scanned backward one 2-byte unit at a time, never one byte
/// at a time, so the split is always unit-aligned.
pub fn find_split(
    chunk: &[u8],
    alignment: Alignment,
    capacity: usize,
) -> Result<usize, SegmentationFailed> {
    let split = match alignment {
        Alignment::Ascii => chunk.iter().rposition(u8::is_ascii).map(|i| i + 1),
        Alignment::Wide(order) => {
            let order = order.unwrap_or(BYTE_ORDER_WITHOUT_BOM);
            chunk
                .chunks_exact(2)
                .rposition(|pair| order.is_narrow_unit([pair[0], pair[1]]))
                .map(|unit| unit * 2 + 2)
        }
    };
    split.ok_or(SegmentationFailed { capacity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ByteOrder;

    #[test]
    fn ascii_split_includes_the_ascii_byte() {
        let chunk = [0xC3, 0x96, b' ', 0xC3, 0x90, 0xC3];
        assert_eq!(find_split(&chunk, Alignment::Ascii, 6), Ok(3));
    }

    #[test]
    fn ascii_byte_at_index_zero_is_a_candidate() {
        let chunk = [b'a', 0xC3, 0x96, 0xC3];
        assert_eq!(find_split(&chunk, Alignment::Ascii, 4), Ok(1));
    }

    #[test]
    fn wide_pairs_are_unit_aligned() {
        // 00 61 would match big-endian at offset 1 if the scan were not aligned.
        let chunk = [0xD6, 0x00, 0x61, 0x00, 0xD0, 0x00];
        assert_eq!(
            find_split(&chunk, Alignment::Wide(Some(ByteOrder::Little)), 6),
            Ok(4)
        );
        let misaligned = [0xD6, 0x00, 0x61, 0xD0];
        assert_eq!(
            find_split(&misaligned, Alignment::Wide(Some(ByteOrder::Big)), 4),
            Err(SegmentationFailed { capacity: 4 })
        );
    }
}
