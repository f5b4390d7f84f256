use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use engine_logging::engine_info;
use mojibake_engine::{EncodingNames, PipelineConfig};
use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OnFailure};

/// Values read from a `--config` file. Every field may be left out.
///
/// ```ron
/// (
///     origin_encoding: "Big5",
///     chunk_capacity: 8192,
///     segmentation: Abort,
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub input_encoding: Option<String>,
    pub middle_encoding: Option<String>,
    pub origin_encoding: Option<String>,
    pub output_encoding: Option<String>,
    pub chunk_capacity: Option<usize>,
    pub segmentation: Option<OnFailure>,
}

impl Settings {
    pub fn parse(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(content)
    }

    /// A settings file that was asked for but cannot be used is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {:?}", path))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("failed to parse settings from {:?}", path))?;
        engine_info!("Loaded settings from {:?}", path);
        Ok(settings)
    }
}

/// Command line over settings file over built-in default.
pub fn resolve(cli: &Cli, settings: &Settings) -> PipelineConfig {
    let defaults = PipelineConfig::default();
    let pick = |flag: &Option<String>, file: &Option<String>, default: String| {
        flag.clone().or_else(|| file.clone()).unwrap_or(default)
    };
    let encodings = EncodingNames {
        input: pick(
            &cli.input_encoding,
            &settings.input_encoding,
            defaults.encodings.input,
        ),
        middle: pick(
            &cli.middle_encoding,
            &settings.middle_encoding,
            defaults.encodings.middle,
        ),
        origin: pick(
            &cli.origin_encoding,
            &settings.origin_encoding,
            defaults.encodings.origin,
        ),
        output: pick(
            &cli.output_encoding,
            &settings.output_encoding,
            defaults.encodings.output,
        ),
    };
    let capacity = cli
        .chunk_size
        .or(settings.chunk_capacity)
        .unwrap_or(defaults.chunk_capacity);
    let segmentation = cli
        .on_segmentation_failure
        .or(settings.segmentation)
        .map_or(defaults.segmentation, Into::into);

    PipelineConfig::new(encodings)
        .with_chunk_capacity(capacity)
        .with_segmentation(segmentation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mojibake_engine::SegmentationPolicy;
    use pretty_assertions::assert_eq;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(["convert", "in.txt", "out.txt"].iter().chain(args).copied())
    }

    #[test]
    fn parses_partial_settings_without_some_wrappers() {
        let settings =
            Settings::parse("(origin_encoding: \"Big5\", segmentation: Abort)").unwrap();
        assert_eq!(
            settings,
            Settings {
                origin_encoding: Some("Big5".to_string()),
                segmentation: Some(OnFailure::Abort),
                ..Settings::default()
            }
        );
        assert_eq!(Settings::parse("()").unwrap(), Settings::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Settings::parse("(chunk_size: 16)").is_err());
    }

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let config = resolve(&cli(&[]), &Settings::default());
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn command_line_wins_over_settings_file() {
        let settings = Settings {
            input_encoding: Some("UTF-16".to_string()),
            origin_encoding: Some("Big5".to_string()),
            chunk_capacity: Some(64),
            segmentation: Some(OnFailure::Abort),
            ..Settings::default()
        };
        let config = resolve(
            &cli(&["UTF-8", "--chunk-size", "128", "--on-segmentation-failure", "degrade"]),
            &settings,
        );

        assert_eq!(config.encodings.input, "UTF-8");
        assert_eq!(config.encodings.middle, "windows-1252");
        assert_eq!(config.encodings.origin, "Big5");
        assert_eq!(config.chunk_capacity, 128);
        assert_eq!(config.segmentation, SegmentationPolicy::Degrade);
    }

    #[test]
    fn settings_file_fills_gaps() {
        let settings = Settings {
            chunk_capacity: Some(64),
            segmentation: Some(OnFailure::Abort),
            ..Settings::default()
        };
        let config = resolve(&cli(&[]), &settings);
        assert_eq!(config.chunk_capacity, 64);
        assert_eq!(config.segmentation, SegmentationPolicy::Abort);
    }
}
