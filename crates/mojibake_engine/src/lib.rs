//! Mojibake engine: encoding resolution, four-stage re-encoding and the chunked stream driver.
mod charset;
mod config;
mod driver;
mod reencode;
mod sink;
mod types;

pub use charset::{Charset, Unmappable};
pub use config::{
    EncodingNames, PipelineConfig, SegmentationPolicy, DEFAULT_CHUNK_CAPACITY,
    DEFAULT_INPUT_ENCODING, DEFAULT_MIDDLE_ENCODING, DEFAULT_ORIGIN_ENCODING,
    DEFAULT_OUTPUT_ENCODING,
};
pub use driver::{DriverState, StreamDriver};
pub use reencode::{FourStageReencoder, ReencodeError, Role, Transcoder};
pub use sink::{convert_file, ensure_parent_dir, open_sink, open_source, Mode};
pub use types::{ConversionReport, ConvertError};
