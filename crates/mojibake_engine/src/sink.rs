use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use engine_logging::engine_info;

use crate::{ConversionReport, ConvertError, PipelineConfig, StreamDriver};

/// How a file is handed to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Chunked,
    /// Read everything and re-encode once.
    WholeFile,
}

/// Ensure the directory that will hold `path` exists; create if missing.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

pub fn open_source(path: &Path) -> Result<BufReader<File>, ConvertError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ConvertError::Source {
            path: path.to_path_buf(),
            source,
        })
}

/// Create (or truncate) the output file. Nothing is rolled back if a later
/// write fails.
pub fn open_sink(path: &Path) -> Result<BufWriter<File>, ConvertError> {
    ensure_parent_dir(path)
        .and_then(|()| File::create(path))
        .map(BufWriter::new)
        .map_err(|source| ConvertError::Sink {
            path: path.to_path_buf(),
            source,
        })
}

/// Repair `input` into `output` with the given configuration.
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &PipelineConfig,
    mode: Mode,
) -> Result<ConversionReport, ConvertError> {
    let mut driver = StreamDriver::new(config.clone())?;
    let source = open_source(input)?;
    let sink = open_sink(output)?;
    engine_info!("converting {:?} -> {:?} ({mode:?})", input, output);
    match mode {
        Mode::Chunked => driver.run(source, sink),
        Mode::WholeFile => driver.run_whole(source, sink),
    }
}
