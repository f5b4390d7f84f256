use std::borrow::Cow;
use std::io::{self, ErrorKind, Read, Write};

use engine_logging::{
    chunk_debug, chunk_error, chunk_trace, chunk_warn, engine_debug, engine_error, engine_info,
    engine_trace, set_chunk_index,
};
use mojibake_core::{
    detect_bom, find_split, Alignment, BomOutcome, CarryBuffer, BYTE_ORDER_WITHOUT_BOM,
};

use crate::{
    ConversionReport, ConvertError, FourStageReencoder, PipelineConfig, SegmentationPolicy,
    Transcoder,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Start,
    BomCheck,
    Looping,
    FinalChunk,
    Done,
}

/// Sequential chunk loop: iteration n's carry feeds iteration n + 1.
pub struct StreamDriver<T: Transcoder = FourStageReencoder> {
    config: PipelineConfig,
    transcoder: T,
    alignment: Alignment,
    state: DriverState,
}

impl StreamDriver<FourStageReencoder> {
    pub fn new(config: PipelineConfig) -> Result<Self, ConvertError> {
        let transcoder = FourStageReencoder::new(&config.encodings);
        for err in transcoder.unsupported() {
            engine_error!("{err}; affected buffers will be written unconverted");
        }
        Self::with_transcoder(config, transcoder)
    }
}

impl<T: Transcoder> StreamDriver<T> {
    pub fn with_transcoder(config: PipelineConfig, transcoder: T) -> Result<Self, ConvertError> {
        let alignment = transcoder.input_alignment();
        config.validate(alignment)?;
        Ok(Self {
            config,
            transcoder,
            alignment,
            state: DriverState::Start,
        })
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Convert `source` into `sink` chunk by chunk.
    ///
    /// I/O errors abort the run; whatever was already written stays in the sink.
    pub fn run<R: Read, W: Write>(
        &mut self,
        mut source: R,
        mut sink: W,
    ) -> Result<ConversionReport, ConvertError> {
        self.ensure_fresh()?;
        let capacity = self.config.chunk_capacity;
        let mut report = ConversionReport::default();
        let mut carry = CarryBuffer::new();
        self.check_bom(&mut source, &mut carry, &mut report)?;

        self.enter(DriverState::Looping);
        let mut buffer = vec![0u8; capacity];
        let last_len = loop {
            let len = read_full(&mut source, &mut buffer)?;
            report.bytes_read += len as u64;
            if len < capacity {
                break len;
            }
            set_chunk_index(report.chunks);
            let split = self.split_point(&carry, &buffer, &mut report)?;
            let combined = carry.hand_off(&buffer, split);
            chunk_trace!("split at {split}, carrying {} bytes", carry.len());
            self.emit(&combined, &mut sink, &mut report)?;
        };

        self.enter(DriverState::FinalChunk);
        set_chunk_index(report.chunks);
        let combined = carry.finish(&buffer[..last_len]);
        engine_debug!(
            "final chunk: {last_len} bytes read, {} bytes to convert",
            combined.len()
        );
        self.emit(&combined, &mut sink, &mut report)?;
        sink.flush()?;

        self.enter(DriverState::Done);
        engine_info!(
            "converted {} bytes into {} bytes over {} chunks",
            report.bytes_read,
            report.bytes_written,
            report.chunks
        );
        Ok(report)
    }

    /// Convert the whole source as one buffer. Only the BOM handling is shared
    /// with the chunked path, so this is the reference the chunked output must match.
    pub fn run_whole<R: Read, W: Write>(
        &mut self,
        mut source: R,
        mut sink: W,
    ) -> Result<ConversionReport, ConvertError> {
        self.ensure_fresh()?;
        let mut report = ConversionReport::default();
        let mut carry = CarryBuffer::new();
        self.check_bom(&mut source, &mut carry, &mut report)?;

        self.enter(DriverState::FinalChunk);
        let mut rest = Vec::new();
        report.bytes_read += source.read_to_end(&mut rest)? as u64;
        let combined = carry.finish(&rest);
        self.emit(&combined, &mut sink, &mut report)?;
        sink.flush()?;

        self.enter(DriverState::Done);
        Ok(report)
    }

    fn ensure_fresh(&self) -> Result<(), ConvertError> {
        match self.state {
            DriverState::Start => Ok(()),
            state => Err(ConvertError::DriverReused { state }),
        }
    }

    fn enter(&mut self, next: DriverState) {
        engine_trace!("driver state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn check_bom<R: Read>(
        &mut self,
        source: &mut R,
        carry: &mut CarryBuffer,
        report: &mut ConversionReport,
    ) -> Result<(), ConvertError> {
        self.enter(DriverState::BomCheck);
        if !self.alignment.needs_bom_check() {
            return Ok(());
        }

        let mut head = [0u8; 2];
        let len = read_full(source, &mut head)?;
        report.bytes_read += len as u64;
        let order = match detect_bom(&head[..len]) {
            BomOutcome::Marker(order) => {
                engine_debug!("consumed {order} byte-order mark");
                report.bom = Some(order);
                order
            }
            BomOutcome::Absent => {
                engine_debug!("no byte-order mark, assuming {BYTE_ORDER_WITHOUT_BOM}");
                carry.seed(&head[..len]);
                BYTE_ORDER_WITHOUT_BOM
            }
        };
        self.transcoder.resolve_input_byte_order(order);
        self.alignment = Alignment::Wide(Some(order));
        Ok(())
    }

    fn split_point(
        &self,
        carry: &CarryBuffer,
        chunk: &[u8],
        report: &mut ConversionReport,
    ) -> Result<usize, ConvertError> {
        let failure = match find_split(chunk, self.alignment, self.config.chunk_capacity) {
            Ok(split) => return Ok(split),
            Err(failure) => failure,
        };
        report.segmentation_failures += 1;
        match self.config.segmentation {
            SegmentationPolicy::Abort => {
                chunk_error!("{failure}");
                Err(failure.into())
            }
            SegmentationPolicy::Degrade => {
                let split = self.best_effort_split(carry, chunk);
                chunk_warn!("{failure}; continuing with a best-effort split at {split}");
                Ok(split)
            }
        }
    }

    // Rightmost unit-aligned cut the transcoder accepts, else the chunk edge.
    fn best_effort_split(&self, carry: &CarryBuffer, chunk: &[u8]) -> usize {
        let unit = self.alignment.unit_len();
        (1..=chunk.len() / unit)
            .rev()
            .map(|units| units * unit)
            .find(|&split| self.transcoder.ends_cleanly(&carry.preview(chunk, split)))
            .unwrap_or(chunk.len())
    }

    fn emit<W: Write>(
        &self,
        combined: &[u8],
        sink: &mut W,
        report: &mut ConversionReport,
    ) -> Result<(), ConvertError> {
        let converted = match self.transcoder.transcode(combined) {
            Ok(bytes) => Cow::Owned(bytes),
            Err(err) => {
                report.passthrough_chunks += 1;
                chunk_debug!("{err}; writing {} bytes unconverted", combined.len());
                Cow::Borrowed(combined)
            }
        };
        sink.write_all(&converted)?;
        report.bytes_written += converted.len() as u64;
        report.chunks += 1;
        Ok(())
    }
}

/// Fill `buf` unless the source ends first; returns the number of bytes read.
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
