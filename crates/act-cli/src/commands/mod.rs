//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod parse;
pub mod render;
pub mod session;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use console::style;

use act_core::error::ParseError;
use act_core::models::config::ActConfig;
use act_core::parser::ParsedAct;

/// Default configuration location under the platform config dir.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("act")
        .join("config.json")
}

/// Configuration file in effect: `--config` or the default location.
pub fn config_file_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration. An explicit path must exist; a missing default file
/// means defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ActConfig> {
    if let Some(path) = config_path {
        return ActConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e));
    }

    let path = default_config_path();
    if path.exists() {
        Ok(ActConfig::from_file(&path)?)
    } else {
        Ok(ActConfig::default())
    }
}

/// Read act text from a file, or from stdin when `input` is `-`.
pub fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    Ok(fs::read_to_string(input)?)
}

/// Turn a parse failure into an error carrying the input hint.
pub fn parse_failure(err: ParseError) -> anyhow::Error {
    anyhow::anyhow!("{}\n\n{}", err, err.hint())
}

/// Print skipped and duplicate lines to stderr.
pub fn report_warnings(parsed: &ParsedAct) {
    for line in &parsed.skipped {
        eprintln!(
            "{} line {} not recognized, skipped: {}",
            style("⚠").yellow(),
            line.line_no,
            line.text
        );
    }
    for line in &parsed.duplicates {
        eprintln!(
            "{} line {} repeats line {}, dropped: {}",
            style("⚠").yellow(),
            line.line_no,
            line.duplicate_of,
            line.text
        );
    }
    if parsed.sanitized {
        eprintln!("{} some names were adjusted", style("ℹ").blue());
    }
}
