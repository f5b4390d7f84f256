use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mojibake_engine::SegmentationPolicy;
use serde::{Deserialize, Serialize};

/// Repair mojibake by replaying a mis-encoding chain in reverse.
#[derive(Debug, Parser)]
#[command(name = "convert")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Corrupted file to read
    pub input: PathBuf,

    /// Where to write the repaired file
    pub output: PathBuf,

    /// Encoding the corrupted file is stored in [default: UTF-8]
    pub input_encoding: Option<String>,

    /// Single-byte encoding the text was wrongly read as [default: windows-1252]
    pub middle_encoding: Option<String>,

    /// Encoding the text was originally written in [default: GBK]
    pub origin_encoding: Option<String>,

    /// Encoding of the repaired file [default: UTF-8]
    pub output_encoding: Option<String>,

    /// Bytes read per chunk [default: 4096]
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// What to do when a chunk has no safe split point [default: degrade]
    #[arg(long, value_enum)]
    pub on_segmentation_failure: Option<OnFailure>,

    /// RON settings file; command-line values take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the whole input and convert it in one pass
    #[arg(long)]
    pub whole_file: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OnFailure {
    Degrade,
    Abort,
}

impl From<OnFailure> for SegmentationPolicy {
    fn from(value: OnFailure) -> Self {
        match value {
            OnFailure::Degrade => SegmentationPolicy::Degrade,
            OnFailure::Abort => SegmentationPolicy::Abort,
        }
    }
}
