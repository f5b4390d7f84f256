use std::io;
use std::path::PathBuf;

use mojibake_core::{ByteOrder, SegmentationFailed};

use crate::DriverState;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid chunk capacity {capacity}: {reason}")]
    InvalidCapacity { capacity: usize, reason: &'static str },
    #[error(transparent)]
    Segmentation(#[from] SegmentationFailed),
    #[error("cannot open input {path:?}: {source}")]
    Source { path: PathBuf, source: io::Error },
    #[error("cannot create output {path:?}: {source}")]
    Sink { path: PathBuf, source: io::Error },
    #[error("stream driver cannot run again from state {state:?}")]
    DriverReused { state: DriverState },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Counters collected over one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Combined buffers handed to the re-encoder, including the final one.
    pub chunks: u64,
    pub segmentation_failures: u64,
    /// Combined buffers written unconverted because an encoding was unsupported.
    pub passthrough_chunks: u64,
    /// Byte order taken from a leading BOM, if one was consumed.
    pub bom: Option<ByteOrder>,
}
