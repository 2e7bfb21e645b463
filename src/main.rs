//! metatag - dump TIFF/Exif tags as JSON.
//!
//! Reads a TIFF file (or a raw Exif payload with `--offset 6`), decodes the
//! selected tag groups and prints them to stdout.

use std::process::ExitCode;

use bytes::Bytes;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metatag::{read_exif, Config, ExifOptions, TagFilter, TagTables};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), String> {
    let filter_config = config.filter_config()?;

    let data = std::fs::read(&config.file)
        .map(Bytes::from)
        .map_err(|e| format!("Failed to read {}: {}", config.file.display(), e))?;
    debug!(file = %config.file.display(), size = data.len(), "Loaded file");

    let options = ExifOptions {
        offset_origin: config.offset,
        include_unknown: config.include_unknown,
        filter: TagFilter::new(&filter_config),
    };
    let exif = read_exif(&data, &TagTables::standard(), &options)
        .map_err(|e| format!("Failed to parse {}: {}", config.file.display(), e))?;

    let json = if config.compact {
        serde_json::to_string(&exif)
    } else {
        serde_json::to_string_pretty(&exif)
    }
    .map_err(|e| format!("Failed to serialize tags: {}", e))?;

    println!("{json}");
    Ok(())
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so stdout carries only the JSON document.
fn init_logging(verbose: bool) {
    let env_filter = if verbose { "metatag=debug" } else { "metatag=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
