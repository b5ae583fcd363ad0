//! Text document built from a template with `{placeholder}` tokens.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{info, warn};

use crate::error::RenderError;
use crate::format::{format_amount, format_money, DATE_FORMAT};
use crate::models::act::ActRecord;
use crate::models::config::RenderConfig;

use super::DocumentRenderer;

/// Template used when none is configured or the configured file is missing.
pub const DEFAULT_TEMPLATE: &str = "\
# АКТ ВЫПОЛНЕННЫХ РАБОТ

Дата: {date}

Объект: {object}

{items}

Итого: {total}

_{vat}_
";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(date|object|total|items|vat)\}").unwrap();
}

/// Markdown-flavoured text renderer.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: Option<PathBuf>,
    currency_symbol: String,
    vat_note: String,
}

impl TemplateRenderer {
    /// Renderer using the built-in template.
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            template: config.template.clone(),
            currency_symbol: config.currency_symbol.clone(),
            vat_note: config.vat_note.clone(),
        }
    }

    /// Use the template at `path`.
    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template = Some(path.into());
        self
    }

    fn load_template(&self) -> Result<Cow<'static, str>, RenderError> {
        let Some(path) = &self.template else {
            return Ok(Cow::Borrowed(DEFAULT_TEMPLATE));
        };

        if !path.exists() {
            warn!(
                "template {} not found, using the built-in template",
                path.display()
            );
            return Ok(Cow::Borrowed(DEFAULT_TEMPLATE));
        }

        let content = fs::read_to_string(path).map_err(|source| RenderError::Template {
            path: path.clone(),
            source,
        })?;
        info!("using template {}", path.display());
        Ok(Cow::Owned(content))
    }

    fn items_table(&self, act: &ActRecord) -> String {
        let mut rows = vec![
            format!(
                "| № | Наименование | Кол-во | Ед. | Сумма, {} |",
                cell(&self.currency_symbol)
            ),
            "|---|---|---|---|---|".to_string(),
        ];

        for (i, item) in act.items().iter().enumerate() {
            rows.push(format!(
                "| {} | {} | {} | {} | {} |",
                i + 1,
                cell(item.name()),
                format_amount(item.quantity()),
                cell(item.unit()),
                format_money(item.line_total())
            ));
        }

        rows.push(format!(
            "| | **Итого** | | | **{}** |",
            format_money(act.total())
        ));
        rows.join("\n")
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for TemplateRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, act: &ActRecord) -> Result<Vec<u8>, RenderError> {
        let template = self.load_template()?;
        let table = self.items_table(act);
        let date = act.date().format(DATE_FORMAT).to_string();
        let total = format!("{} {}", format_money(act.total()), self.currency_symbol);

        // Single pass, so placeholder-like text in user data stays literal.
        let mut document = PLACEHOLDER
            .replace_all(&template, |caps: &Captures<'_>| match &caps[1] {
                "date" => date.clone(),
                "object" => act.object_name().to_string(),
                "total" => total.clone(),
                "items" => table.clone(),
                _ => self.vat_note.clone(),
            })
            .into_owned();

        if !template.contains("{items}") {
            if !document.is_empty() && !document.ends_with('\n') {
                document.push('\n');
            }
            document.push('\n');
            document.push_str(&table);
            document.push('\n');
        }

        Ok(document.into_bytes())
    }
}

/// Escape a value for a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::act::LineItem;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_act() -> ActRecord {
        ActRecord::new(
            NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            "Офис {total}",
            vec![
                LineItem::new("Услуги по уборке", dec("1"), "кв.м.", dec("1500")).unwrap(),
                LineItem::new("Мытье окон | фасад", dec("3"), "шт.", dec("500")).unwrap(),
            ],
        )
        .unwrap()
    }

    fn render(renderer: &TemplateRenderer) -> String {
        String::from_utf8(renderer.render(&sample_act()).unwrap()).unwrap()
    }

    #[test]
    fn test_default_template() {
        let document = render(&TemplateRenderer::new());

        assert_eq!(
            document,
            "# АКТ ВЫПОЛНЕННЫХ РАБОТ\n\
             \n\
             Дата: 12.05.2024\n\
             \n\
             Объект: Офис {total}\n\
             \n\
             | № | Наименование | Кол-во | Ед. | Сумма, ₽ |\n\
             |---|---|---|---|---|\n\
             | 1 | Услуги по уборке | 1 | кв.м. | 1500.00 |\n\
             | 2 | Мытье окон \\| фасад | 3 | шт. | 1500.00 |\n\
             | | **Итого** | | | **3000.00** |\n\
             \n\
             Итого: 3000.00 ₽\n\
             \n\
             _Без НДС_\n"
        );
    }

    #[test]
    fn test_custom_template_without_items_gets_table_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("act.md");
        fs::write(&path, "Акт от {date} на сумму {total}").unwrap();

        let document = render(&TemplateRenderer::new().with_template(&path));
        let lines: Vec<&str> = document.lines().collect();

        assert_eq!(lines[0], "Акт от 12.05.2024 на сумму 3000.00 ₽");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("| № |"));
        assert_eq!(lines.last(), Some(&"| | **Итого** | | | **3000.00** |"));
    }

    #[test]
    fn test_missing_template_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new().with_template(dir.path().join("missing.md"));

        assert_eq!(render(&renderer), render(&TemplateRenderer::new()));
    }

    #[test]
    fn test_unreadable_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        let renderer = TemplateRenderer::new().with_template(dir.path());

        let err = renderer.render(&sample_act()).unwrap_err();
        assert!(matches!(err, RenderError::Template { .. }));
    }
}
