use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use engine_logging::engine_info;
use mojibake_engine::{
    ensure_parent_dir, ConversionReport, Mode, PipelineConfig, SegmentationPolicy,
};
use serde_json::{json, Value};

/// Run report: counters plus the configuration that produced them.
pub fn build(config: &PipelineConfig, mode: Mode, report: &ConversionReport) -> Value {
    json!({
        "encodings": {
            "input": config.encodings.input,
            "middle": config.encodings.middle,
            "origin": config.encodings.origin,
            "output": config.encodings.output,
        },
        "chunk_capacity": config.chunk_capacity,
        "segmentation": match config.segmentation {
            SegmentationPolicy::Degrade => "degrade",
            SegmentationPolicy::Abort => "abort",
        },
        "mode": match mode {
            Mode::Chunked => "chunked",
            Mode::WholeFile => "whole-file",
        },
        "bytes_read": report.bytes_read,
        "bytes_written": report.bytes_written,
        "chunks": report.chunks,
        "segmentation_failures": report.segmentation_failures,
        "passthrough_chunks": report.passthrough_chunks,
        "bom": report.bom.map(|order| order.to_string()),
    })
}

pub fn write(
    path: &Path,
    config: &PipelineConfig,
    mode: Mode,
    report: &ConversionReport,
) -> Result<()> {
    let content = serde_json::to_string_pretty(&build(config, mode, report))
        .context("failed to serialize run report")?;
    ensure_parent_dir(path)
        .and_then(|()| fs::write(path, content))
        .with_context(|| format!("failed to write run report to {:?}", path))?;
    engine_info!("Wrote run report to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_counters_and_configuration() {
        let report = ConversionReport {
            bytes_read: 8,
            bytes_written: 6,
            chunks: 3,
            segmentation_failures: 2,
            ..ConversionReport::default()
        };
        let value = build(&PipelineConfig::default(), Mode::Chunked, &report);

        assert_eq!(value["encodings"]["origin"], "GBK");
        assert_eq!(value["chunk_capacity"], 4096);
        assert_eq!(value["segmentation"], "degrade");
        assert_eq!(value["mode"], "chunked");
        assert_eq!(value["segmentation_failures"], 2);
        assert!(value["bom"].is_null());
    }

    #[test]
    fn report_names_policy_and_mode_explicitly() {
        let config = PipelineConfig::default().with_segmentation(SegmentationPolicy::Abort);
        let value = build(&config, Mode::WholeFile, &ConversionReport::default());
        assert_eq!(value["segmentation"], "abort");
        assert_eq!(value["mode"], "whole-file");
    }
}
