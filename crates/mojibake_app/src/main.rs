mod cli;
mod logging;
mod report;
mod settings;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::{engine_error, engine_warn};
use mojibake_engine::{convert_file, Mode};

use crate::cli::Cli;
use crate::settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.verbose, cli.log_file.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            engine_error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let config = settings::resolve(cli, &settings);
    let mode = if cli.whole_file {
        Mode::WholeFile
    } else {
        Mode::Chunked
    };

    let report = convert_file(&cli.input, &cli.output, &config, mode)
        .with_context(|| format!("failed to convert {:?}", cli.input))?;
    if report.segmentation_failures > 0 {
        engine_warn!(
            "{} chunks had no safe split point; consider a chunk size above {}",
            report.segmentation_failures,
            config.chunk_capacity
        );
    }

    if let Some(path) = &cli.report {
        report::write(path, &config, mode, &report)?;
    }
    Ok(())
}
