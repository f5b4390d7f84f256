use std::fmt;

use engine_logging::chunk_debug;
use mojibake_core::{Alignment, ByteOrder};

use crate::charset::{Charset, Unmappable};
use crate::config::EncodingNames;

/// Which of the four configured encodings a stage uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Input,
    Middle,
    Origin,
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Input => write!(f, "input"),
            Role::Middle => write!(f, "middle"),
            Role::Origin => write!(f, "origin"),
            Role::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReencodeError {
    #[error("unsupported {role} encoding {label:?}")]
    UnsupportedEncoding { role: Role, label: String },
}

/// Converts one combined buffer at a time; holds no state between buffers.
pub trait Transcoder {
    fn transcode(&self, bytes: &[u8]) -> Result<Vec<u8>, ReencodeError>;

    /// True when `bytes`, starting at a safe boundary, also ends on one.
    fn ends_cleanly(&self, bytes: &[u8]) -> bool;

    /// Alignment the boundary finder must use for the raw input.
    fn input_alignment(&self) -> Alignment;

    /// Called once by the driver after the BOM check settles a wide input.
    fn resolve_input_byte_order(&mut self, order: ByteOrder);
}

#[derive(Debug, Clone)]
struct Stage {
    role: Role,
    label: String,
    charset: Option<Charset>,
}

impl Stage {
    fn resolve(role: Role, label: &str) -> Self {
        Self {
            role,
            label: label.to_string(),
            charset: Charset::for_label(label),
        }
    }

    fn charset(&self) -> Result<Charset, ReencodeError> {
        self.charset.ok_or_else(|| ReencodeError::UnsupportedEncoding {
            role: self.role,
            label: self.label.clone(),
        })
    }
}

/// decode(input) -> encode(middle) -> decode(origin) -> encode(output).
#[derive(Debug, Clone)]
pub struct FourStageReencoder {
    input: Stage,
    middle: Stage,
    origin: Stage,
    output: Stage,
}

impl FourStageReencoder {
    pub fn new(encodings: &EncodingNames) -> Self {
        Self {
            input: Stage::resolve(Role::Input, &encodings.input),
            middle: Stage::resolve(Role::Middle, &encodings.middle),
            origin: Stage::resolve(Role::Origin, &encodings.origin),
            output: Stage::resolve(Role::Output, &encodings.output),
        }
    }

    /// Every stage whose label did not resolve.
    pub fn unsupported(&self) -> Vec<ReencodeError> {
        self.stages()
            .into_iter()
            .filter_map(|stage| stage.charset().err())
            .collect()
    }

    fn stages(&self) -> [&Stage; 4] {
        [&self.input, &self.middle, &self.origin, &self.output]
    }

    fn charsets(&self) -> Result<[Charset; 4], ReencodeError> {
        Ok([
            self.input.charset()?,
            self.middle.charset()?,
            self.origin.charset()?,
            self.output.charset()?,
        ])
    }
}

impl Transcoder for FourStageReencoder {
    fn transcode(&self, bytes: &[u8]) -> Result<Vec<u8>, ReencodeError> {
        let [input, middle, origin, output] = self.charsets()?;

        let (text, malformed) = input.decode(bytes);
        if malformed {
            chunk_debug!("malformed {} sequences replaced", input.name());
        }
        let (historical, dropped) = middle.encode(&text, Unmappable::Drop);
        if dropped > 0 {
            chunk_debug!("dropped {dropped} characters unmappable in {}", middle.name());
        }
        let (recovered, malformed) = origin.decode(&historical);
        if malformed {
            chunk_debug!("malformed {} sequences replaced", origin.name());
        }
        let (converted, substituted) = output.encode(&recovered, Unmappable::Substitute('?'));
        if substituted > 0 {
            chunk_debug!(
                "substituted {substituted} characters unmappable in {}",
                output.name()
            );
        }
        Ok(converted)
    }

    fn ends_cleanly(&self, bytes: &[u8]) -> bool {
        let Ok([input, middle, origin, _]) = self.charsets() else {
            return false;
        };
        input
            .decode_complete(bytes)
            .map(|text| middle.encode(&text, Unmappable::Drop).0)
            .and_then(|historical| origin.decode_complete(&historical))
            .is_some()
    }

    fn input_alignment(&self) -> Alignment {
        self.input
            .charset
            .map_or(Alignment::Ascii, Charset::alignment)
    }

    fn resolve_input_byte_order(&mut self, order: ByteOrder) {
        self.input.charset = self.input.charset.map(|c| c.with_byte_order(order));
    }
}
