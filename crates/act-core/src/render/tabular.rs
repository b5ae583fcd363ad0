//! Machine-readable CSV and JSON documents.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::RenderError;
use crate::format::{format_money, format_plain, DATE_FORMAT};
use crate::models::act::ActRecord;
use crate::models::config::RenderConfig;

use super::DocumentRenderer;

/// One row per item plus a total row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl DocumentRenderer for CsvRenderer {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, act: &ActRecord) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);

            wtr.write_record([
                "index", "date", "object", "name", "quantity", "unit", "price", "line_total",
            ])?;

            let date = act.date().format(DATE_FORMAT).to_string();
            for (i, item) in act.items().iter().enumerate() {
                let index = (i + 1).to_string();
                let quantity = format_plain(item.quantity());
                let price = format_plain(item.price());
                let line_total = format_money(item.line_total());
                let record: [&str; 8] = [
                    &index,
                    &date,
                    act.object_name(),
                    item.name(),
                    &quantity,
                    item.unit(),
                    &price,
                    &line_total,
                ];
                wtr.write_record(record)?;
            }

            let total = format_money(act.total());
            let record: [&str; 8] = ["", &date, act.object_name(), "Итого", "", "", "", &total];
            wtr.write_record(record)?;
            wtr.flush()?;
        }
        Ok(buf)
    }
}

#[derive(Serialize)]
struct JsonItem<'a> {
    name: &'a str,
    quantity: Decimal,
    unit: &'a str,
    price: Decimal,
    line_total: Decimal,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    date: NaiveDate,
    object_name: &'a str,
    items: Vec<JsonItem<'a>>,
    total: Decimal,
    currency: &'a str,
}

/// Pretty-printed JSON with line and grand totals.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    currency_symbol: String,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, act: &ActRecord) -> Result<Vec<u8>, RenderError> {
        let document = JsonDocument {
            date: act.date(),
            object_name: act.object_name(),
            items: act
                .items()
                .iter()
                .map(|item| JsonItem {
                    name: item.name(),
                    quantity: item.quantity(),
                    unit: item.unit(),
                    price: item.price(),
                    line_total: item.line_total(),
                })
                .collect(),
            total: act.total(),
            currency: &self.currency_symbol,
        };

        Ok(serde_json::to_vec_pretty(&document)?)
    }
}
