//! Configuration for the `metatag` dump tool.
//!
//! All options can be given on the command line or through environment
//! variables with the `METATAG_` prefix:
//!
//! - `METATAG_FILE` - TIFF or Exif file to read
//! - `METATAG_INCLUDE` - JSON object of groups to include, e.g. `{"exif": ["Make"]}`
//! - `METATAG_EXCLUDE` - JSON object of groups to exclude
//! - `METATAG_FILTER_FILE` - JSON file with `includeTags` / `excludeTags`
//! - `METATAG_INCLUDE_UNKNOWN` - Emit tags missing from the name tables
//! - `METATAG_OFFSET` - Position of the TIFF header in the file (default: 0)
//!
//! `--include` / `--exclude` replace the corresponding half of the filter file.

use std::path::PathBuf;

use clap::Parser;

use crate::filter::{FilterConfig, GroupSpecs};

/// Offset of the TIFF header in a raw `Exif\0\0` payload.
pub const EXIF_PAYLOAD_OFFSET: usize = 6;

/// metatag - dump TIFF/Exif tags as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "metatag")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// TIFF or raw Exif file to read.
    #[arg(env = "METATAG_FILE")]
    pub file: PathBuf,

    // =========================================================================
    // Filter Configuration
    // =========================================================================
    /// Groups and tags to include, as a JSON object.
    #[arg(long, env = "METATAG_INCLUDE")]
    pub include: Option<String>,

    /// Groups and tags to exclude, as a JSON object.
    #[arg(long, env = "METATAG_EXCLUDE")]
    pub exclude: Option<String>,

    /// JSON file holding a full filter configuration.
    #[arg(long, env = "METATAG_FILTER_FILE")]
    pub filter_file: Option<PathBuf>,

    // =========================================================================
    // Decoding Configuration
    // =========================================================================
    /// Emit tags missing from the name tables as `undefined-<code>`.
    #[arg(long, default_value_t = false, env = "METATAG_INCLUDE_UNKNOWN")]
    pub include_unknown: bool,

    /// Position of the TIFF header in the file.
    ///
    /// Use 6 for a raw APP1 payload starting with `Exif\0\0`.
    #[arg(long, default_value_t = 0, env = "METATAG_OFFSET")]
    pub offset: usize,

    // =========================================================================
    // Output Configuration
    // =========================================================================
    /// Print JSON on a single line.
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.file.as_os_str().is_empty() {
            return Err("Input file is required. Pass FILE or set METATAG_FILE".to_string());
        }

        if let Some(ref include) = self.include {
            parse_group_specs("--include", include)?;
        }
        if let Some(ref exclude) = self.exclude {
            parse_group_specs("--exclude", exclude)?;
        }

        if let Some(ref path) = self.filter_file {
            if !path.is_file() {
                return Err(format!("Filter file not found: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Build the filter configuration from the filter file and overrides.
    pub fn filter_config(&self) -> Result<FilterConfig, String> {
        let mut config = match self.filter_file {
            Some(ref path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
                serde_json::from_str::<FilterConfig>(&text)
                    .map_err(|e| format!("Invalid filter file {}: {}", path.display(), e))?
            }
            None => FilterConfig::default(),
        };

        if let Some(ref include) = self.include {
            config.include_tags = Some(parse_group_specs("--include", include)?);
        }
        if let Some(ref exclude) = self.exclude {
            config.exclude_tags = Some(parse_group_specs("--exclude", exclude)?);
        }

        Ok(config)
    }
}

fn parse_group_specs(option: &str, json: &str) -> Result<GroupSpecs, String> {
    serde_json::from_str(json).map_err(|e| format!("{option} is not a valid group object: {e}"))
}

// =============================================================================
// Tests
// =============================================================================
