//! Configuration structures for parsing and rendering acts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::act::DEFAULT_UNIT;

/// Main configuration for the act pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActConfig {
    /// Line recognition configuration.
    pub parser: ParserConfig,

    /// Vocabulary substitution configuration.
    pub sanitizer: SanitizerConfig,

    /// Document output configuration.
    pub render: RenderConfig,
}

/// Line recognition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Unit assigned to items whose line names none.
    pub default_unit: String,

    /// Extra unit synonyms (lower-case spelling -> canonical form).
    pub unit_aliases: BTreeMap<String, String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            default_unit: DEFAULT_UNIT.to_string(),
            unit_aliases: BTreeMap::new(),
        }
    }
}

/// Vocabulary substitution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Replace disallowed phrases before parsing.
    pub enabled: bool,

    /// Note appended to sanitized text.
    pub annotation: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            annotation: "(названия скорректированы)".to_string(),
        }
    }
}

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    /// Markdown-flavoured text document built from a template.
    #[default]
    Text,
    /// CSV table.
    Csv,
    /// JSON document.
    Json,
}

/// Document output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default output format.
    pub format: RenderFormat,

    /// Currency symbol printed after amounts.
    pub currency_symbol: String,

    /// Text template path; the built-in template is used when unset.
    pub template: Option<PathBuf>,

    /// Directory rendered documents are written to.
    pub output_dir: PathBuf,

    /// Tax note printed under the total.
    pub vat_note: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: RenderFormat::Text,
            currency_symbol: "₽".to_string(),
            template: None,
            output_dir: PathBuf::from("out"),
            vat_note: "Без НДС".to_string(),
        }
    }
}

impl ActConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
