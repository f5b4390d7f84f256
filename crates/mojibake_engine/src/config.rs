use mojibake_core::Alignment;

use crate::ConvertError;

pub const DEFAULT_CHUNK_CAPACITY: usize = 4096;
pub const DEFAULT_INPUT_ENCODING: &str = "UTF-8";
pub const DEFAULT_MIDDLE_ENCODING: &str = "windows-1252";
pub const DEFAULT_ORIGIN_ENCODING: &str = "GBK";
pub const DEFAULT_OUTPUT_ENCODING: &str = "UTF-8";

/// The four encoding labels of the repair chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingNames {
    /// What the corrupted file is stored as today.
    pub input: String,
    /// The single-byte encoding the text was wrongly passed through.
    pub middle: String,
    /// The encoding the text was originally written in.
    pub origin: String,
    /// What the repaired file should be written as.
    pub output: String,
}

impl Default for EncodingNames {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT_ENCODING.to_string(),
            middle: DEFAULT_MIDDLE_ENCODING.to_string(),
            origin: DEFAULT_ORIGIN_ENCODING.to_string(),
            output: DEFAULT_OUTPUT_ENCODING.to_string(),
        }
    }
}

/// What the driver does when a chunk has no safe split point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentationPolicy {
    /// Warn and split at a best-effort point.
    #[default]
    Degrade,
    /// Fail the run.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub encodings: EncodingNames,
    pub chunk_capacity: usize,
    pub segmentation: SegmentationPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(EncodingNames::default())
    }
}

impl PipelineConfig {
    pub fn new(encodings: EncodingNames) -> Self {
        Self {
            encodings,
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            segmentation: SegmentationPolicy::default(),
        }
    }

    pub fn with_chunk_capacity(mut self, chunk_capacity: usize) -> Self {
        self.chunk_capacity = chunk_capacity;
        self
    }

    pub fn with_segmentation(mut self, segmentation: SegmentationPolicy) -> Self {
        self.segmentation = segmentation;
        self
    }

    /// Check the capacity against the input alignment before any I/O happens.
    pub fn validate(&self, alignment: Alignment) -> Result<(), ConvertError> {
        let capacity = self.chunk_capacity;
        if capacity < 2 {
            return Err(ConvertError::InvalidCapacity {
                capacity,
                reason: "must be at least 2 bytes",
            });
        }
        if alignment.is_wide() && capacity % 2 != 0 {
            return Err(ConvertError::InvalidCapacity {
                capacity,
                reason: "must be even for UTF-16 input",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mojibake_core::ByteOrder;

    #[test]
    fn defaults_describe_gbk_through_latin_repair() {
        let config = PipelineConfig::default();
        assert_eq!(config.encodings.input, "UTF-8");
        assert_eq!(config.encodings.middle, "windows-1252");
        assert_eq!(config.encodings.origin, "GBK");
        assert_eq!(config.encodings.output, "UTF-8");
        assert_eq!(config.chunk_capacity, 4096);
        assert_eq!(config.segmentation, SegmentationPolicy::Degrade);
    }

    #[test]
    fn capacity_rules_depend_on_alignment() {
        let odd = PipelineConfig::default().with_chunk_capacity(5);
        assert!(odd.validate(Alignment::Ascii).is_ok());
        assert!(matches!(
            odd.validate(Alignment::Wide(Some(ByteOrder::Little))),
            Err(ConvertError::InvalidCapacity { capacity: 5, .. })
        ));

        let tiny = PipelineConfig::default().with_chunk_capacity(1);
        assert!(matches!(
            tiny.validate(Alignment::Ascii),
            Err(ConvertError::InvalidCapacity { capacity: 1, .. })
        ));
    }
}
