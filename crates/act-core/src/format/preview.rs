//! Confirmation preview with chat-style bold markup.

use crate::models::act::ActRecord;
use crate::models::config::RenderConfig;

use super::{format_amount, DATE_FORMAT};

const NAME_WIDTH: usize = 30;
const RULE_WIDTH: usize = 80;

/// Preview formatter.
#[derive(Debug, Clone)]
pub struct PreviewFormatter {
    currency_symbol: String,
    vat_note: String,
}

impl PreviewFormatter {
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            vat_note: config.vat_note.clone(),
        }
    }

    /// Render the preview: title, date, object, item table and total.
    ///
    /// User-supplied text is escaped; item names are cut to 30 characters.
    pub fn render(&self, act: &ActRecord) -> String {
        let currency = escape(&self.currency_symbol);
        let rule = "-".repeat(RULE_WIDTH);

        let mut lines = vec![
            "<b>Акт выполненных работ</b>".to_string(),
            String::new(),
            format!("<b>Дата:</b> {}", act.date().format(DATE_FORMAT)),
            format!("<b>Объект:</b> {}", escape(act.object_name())),
            String::new(),
            format!(
                "<b>№ п/п</b> | <b>Наименование работ</b> | <b>Кол-во</b> | \
                 <b>Ед. изм.</b> | <b>Цена за ед., {currency}</b> | <b>Стоимость, {currency}</b>"
            ),
            rule.clone(),
        ];

        for (i, item) in act.items().iter().enumerate() {
            let name: String = item.name().chars().take(NAME_WIDTH).collect();
            lines.push(format!(
                "{:>5} | {:<width$} | {:>6} | {:^8} | {:>12} | {:>12}",
                i + 1,
                escape(&name),
                format_amount(item.quantity()),
                escape(item.unit()),
                format_amount(item.price()),
                format_amount(item.line_total()),
                width = NAME_WIDTH,
            ));
        }

        lines.push(rule);
        lines.push(format!(
            "<b>Итого:</b> {} {}",
            format_amount(act.total()),
            currency
        ));
        if !self.vat_note.is_empty() {
            lines.push(format!("<b>{}</b>", escape(&self.vat_note)));
        }

        lines.join("\n")
    }
}

impl Default for PreviewFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a preview with the default currency and tax note.
pub fn render_preview(act: &ActRecord) -> String {
    PreviewFormatter::new().render(act)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
