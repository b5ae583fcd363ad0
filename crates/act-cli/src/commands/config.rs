//! Config command - inspect and edit the JSON configuration.
//!
//! Keys are dotted paths into the file (`render.currency_symbol`). Unit
//! aliases may contain dots themselves, so everything after
//! `parser.unit_aliases.` is taken as one alias: `parser.unit_aliases.кв.м`.

use std::fs;
use std::path::Path;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use act_core::models::config::ActConfig;

use super::config_file_path;

const ALIASES_PREFIX: &str = "parser.unit_aliases.";

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value, e.g. `render.currency_symbol`
    Get { key: String },

    /// Change one value; VALUE is read as JSON, falling back to a string
    Set { key: String, value: String },

    /// Print where the configuration file lives
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_file_path(config_path);

    match args.action {
        ConfigAction::Show => {
            if !path.exists() {
                eprintln!(
                    "{} {} does not exist, showing defaults",
                    style("ℹ").blue(),
                    path.display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&load_or_default(&path)?)?);
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists, pass --force to replace it", path.display());
            }
            save(&ActConfig::default(), &path)?;
            println!("{} Wrote default configuration to {}", style("✓").green(), path.display());
        }
        ConfigAction::Get { key } => {
            let json = serde_json::to_value(load_or_default(&path)?)?;
            let value = key_path(&key)
                .into_iter()
                .try_fold(&json, |node, segment| node.get(segment))
                .ok_or_else(|| unknown_key(&key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigAction::Set { key, value } => set_value(&path, &key, &value)?,
        ConfigAction::Path => {
            let status = if path.exists() {
                style("exists").green()
            } else {
                style("missing, run `act config init`").yellow()
            };
            println!("{} ({})", path.display(), status);
        }
    }

    Ok(())
}

/// Object keys addressed by a dotted `key`.
fn key_path(key: &str) -> Vec<&str> {
    match key.strip_prefix(ALIASES_PREFIX) {
        Some(alias) if !alias.is_empty() => vec!["parser", "unit_aliases", alias],
        _ => key.split('.').collect(),
    }
}

fn set_value(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    let mut json = serde_json::to_value(load_or_default(path)?)?;

    let segments = key_path(key);
    let (field, parents) = segments.split_last().ok_or_else(|| unknown_key(key))?;
    let mut node = &mut json;
    for segment in parents {
        node = node.get_mut(*segment).ok_or_else(|| unknown_key(key))?;
    }
    let section = node.as_object_mut().ok_or_else(|| unknown_key(key))?;
    // Only the alias map accepts new keys
    if !section.contains_key(*field) && *parents != ["parser", "unit_aliases"] {
        return Err(unknown_key(key));
    }
    section.insert((*field).to_string(), value.clone());

    let config: ActConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    save(&config, path)?;

    println!("{} {} = {}", style("✓").green(), key, value);
    Ok(())
}

fn load_or_default(path: &Path) -> anyhow::Result<ActConfig> {
    if path.exists() {
        Ok(ActConfig::from_file(path)?)
    } else {
        Ok(ActConfig::default())
    }
}

fn save(config: &ActConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    config.save(path)?;
    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!("Unknown configuration key: {}", key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_dotted_keys() {
        assert_eq!(key_path("render.currency_symbol"), ["render", "currency_symbol"]);
        assert_eq!(key_path("parser.unit_aliases.кв.м"), ["parser", "unit_aliases", "кв.м"]);
        assert_eq!(key_path("parser.unit_aliases"), ["parser", "unit_aliases"]);
    }
}
