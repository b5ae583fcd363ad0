//! Document rendering for confirmed acts.
//!
//! Renderers only read the [`ActRecord`]; a failed render leaves it intact
//! for another attempt.

mod tabular;
mod template;

pub use tabular::{CsvRenderer, JsonRenderer};
pub use template::{TemplateRenderer, DEFAULT_TEMPLATE};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::error::RenderError;
use crate::format::DATE_FORMAT;
use crate::models::act::ActRecord;
use crate::models::config::{RenderConfig, RenderFormat};

/// Trait for document backends.
pub trait DocumentRenderer {
    /// File extension of produced documents, without the dot.
    fn extension(&self) -> &'static str;

    /// Render `act` into document bytes.
    fn render(&self, act: &ActRecord) -> Result<Vec<u8>, RenderError>;
}

/// A rendered document with its suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    /// Write the document into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes)?;
        info!("document saved: {}", path.display());
        Ok(path)
    }
}

/// `Act_<DD.MM.YYYY>_<unix-timestamp>.<ext>`
pub fn suggested_filename(act: &ActRecord, extension: &str, timestamp: i64) -> String {
    format!(
        "Act_{}_{}.{}",
        act.date().format(DATE_FORMAT),
        timestamp,
        extension
    )
}

/// Render `act` and name the result after the current time.
pub fn render_document(
    renderer: &dyn DocumentRenderer,
    act: &ActRecord,
) -> Result<RenderedDocument, RenderError> {
    let bytes = renderer.render(act)?;
    let filename = suggested_filename(act, renderer.extension(), Utc::now().timestamp());
    Ok(RenderedDocument { filename, bytes })
}

/// Renderer for `format`, configured from `config`.
pub fn renderer_for(format: RenderFormat, config: &RenderConfig) -> Box<dyn DocumentRenderer> {
    match format {
        RenderFormat::Text => Box::new(TemplateRenderer::from_config(config)),
        RenderFormat::Csv => Box::new(CsvRenderer),
        RenderFormat::Json => Box::new(JsonRenderer::from_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_act;
    use pretty_assertions::assert_eq;

    fn sample_act() -> ActRecord {
        parse_act("#АКТ 12.05.2024 | Объект: Офис\nУборка 2 × 1000").unwrap()
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(
            suggested_filename(&sample_act(), "md", 1715472000),
            "Act_12.05.2024_1715472000.md"
        );
    }

    #[test]
    fn test_renderer_for_format() {
        let config = RenderConfig::default();
        assert_eq!(renderer_for(RenderFormat::Text, &config).extension(), "md");
        assert_eq!(renderer_for(RenderFormat::Csv, &config).extension(), "csv");
        assert_eq!(renderer_for(RenderFormat::Json, &config).extension(), "json");
    }

    #[test]
    fn test_render_and_write_document() {
        let act = sample_act();
        let document = render_document(&CsvRenderer, &act).unwrap();
        assert!(document.filename.starts_with("Act_12.05.2024_"));
        assert!(document.filename.ends_with(".csv"));

        let dir = tempfile::tempdir().unwrap();
        let path = document.write_to(&dir.path().join("out")).unwrap();
        assert_eq!(fs::read(&path).unwrap(), document.bytes);
    }
}
