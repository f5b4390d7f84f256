//! Mojibake core: pure byte-level segmentation logic for the re-encoding pipeline.
mod bom;
mod boundary;
mod carry;
mod descriptor;

pub use bom::{detect_bom, BomOutcome, BOM_BE, BOM_LE, BYTE_ORDER_WITHOUT_BOM};
pub use boundary::{find_split, SegmentationFailed};
pub use carry::{concat, CarryBuffer};
pub use descriptor::{Alignment, ByteOrder};
