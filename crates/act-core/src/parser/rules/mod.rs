//! Rule-based line item recognition.
//!
//! Every supported phrasing ("dialect") has its own matcher. The recognizer
//! tries them in [`CASCADE`] order and keeps the first item that matches and
//! validates.

pub mod canonical;
pub mod count_by_price;
pub mod module_count;
pub mod numbers;
pub mod patterns;
pub mod shift_rate;
pub mod units;

pub use canonical::CanonicalMatcher;
pub use count_by_price::CountByPriceMatcher;
pub use module_count::{ModuleCountMatcher, MODULE_UNIT};
pub use numbers::{parse_number, parse_price, parse_quantity};
pub use shift_rate::ShiftRateMatcher;
pub use units::UnitTable;

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::models::act::LineItem;
use crate::models::config::ParserConfig;
use patterns::UNIT_TOKEN;

/// Supported line phrasings, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// `<name> <qty>[ x <mult>] [<unit>] × <price>`
    Canonical,
    /// `N <name> по <price>`
    CountByPrice,
    /// `N <name> по <price> ... K ночи` (price per shift times K)
    ShiftRate,
    /// `<name>, N модулей по <price>`
    ModuleCount,
}

/// Order in which dialects are tried. First match wins.
pub const CASCADE: [Dialect; 4] = [
    Dialect::Canonical,
    Dialect::CountByPrice,
    Dialect::ShiftRate,
    Dialect::ModuleCount,
];

impl Dialect {
    /// Matcher implementing this dialect.
    pub fn matcher(self) -> &'static dyn ItemMatcher {
        match self {
            Dialect::Canonical => &CanonicalMatcher,
            Dialect::CountByPrice => &CountByPriceMatcher,
            Dialect::ShiftRate => &ShiftRateMatcher,
            Dialect::ModuleCount => &ModuleCountMatcher,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Canonical => "canonical",
            Dialect::CountByPrice => "count_by_price",
            Dialect::ShiftRate => "shift_rate",
            Dialect::ModuleCount => "module_count",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by all matchers.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub units: &'a UnitTable,
    pub default_unit: &'a str,
}

/// Trait for single-dialect line matchers.
pub trait ItemMatcher {
    /// Dialect this matcher recognizes.
    fn dialect(&self) -> Dialect;

    /// Recognize `line` (whitespace already collapsed).
    ///
    /// Returns `None` when the line is not in this dialect or when the
    /// extracted values do not form a valid item.
    fn match_line(&self, line: &str, ctx: &MatchContext<'_>) -> Option<LineItem>;
}

/// Validate a candidate, logging why it was discarded.
pub(crate) fn build_item(
    dialect: Dialect,
    name: &str,
    quantity: Decimal,
    unit: String,
    price: Decimal,
) -> Option<LineItem> {
    match LineItem::new(name, quantity, unit, price) {
        Ok(item) => Some(item),
        Err(e) => {
            debug!("{} candidate rejected: {}", dialect, e);
            None
        }
    }
}

/// Item name from a count-first capture. Leading `#` is dropped so the
/// canonical line of the item is not read back as a comment.
pub(crate) fn count_first_name(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c == '#' || c.is_whitespace())
        .trim_matches(|c: char| c == ' ' || c == ',')
}

/// An item together with the dialect that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedItem {
    pub dialect: Dialect,
    pub item: LineItem,
}

/// Line item recognizer running the dialect cascade.
#[derive(Debug, Clone)]
pub struct ItemRecognizer {
    units: UnitTable,
    default_unit: String,
}

impl ItemRecognizer {
    /// Create a recognizer with built-in units and the default unit.
    pub fn new() -> Self {
        Self {
            units: UnitTable::new(),
            default_unit: crate::models::act::DEFAULT_UNIT.to_string(),
        }
    }

    /// Create a recognizer from parser configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new()
            .with_units(UnitTable::new().with_aliases(config.unit_aliases.clone()))
            .with_default_unit(&config.default_unit)
    }

    /// Set the unit used when a line names none.
    ///
    /// The unit is normalized through the synonym table. A unit the
    /// canonical pattern cannot read back (`м2`, `кв м`) is ignored.
    pub fn with_default_unit(mut self, unit: &str) -> Self {
        let unit = unit.trim();
        if unit.is_empty() {
            return self;
        }
        if !UNIT_TOKEN.is_match(unit) {
            warn!("default unit `{}` ignored, keeping `{}`", unit, self.default_unit);
            return self;
        }
        self.default_unit = self.units.normalize(unit);
        self
    }

    /// Replace the unit synonym table.
    pub fn with_units(mut self, units: UnitTable) -> Self {
        self.default_unit = units.normalize(&self.default_unit);
        self.units = units;
        self
    }

    /// Recognize one line, reporting which dialect matched.
    pub fn recognize(&self, line: &str) -> Option<RecognizedItem> {
        let line = collapse_whitespace(line);
        let ctx = MatchContext {
            units: &self.units,
            default_unit: &self.default_unit,
        };

        for dialect in CASCADE {
            if let Some(item) = dialect.matcher().match_line(&line, &ctx) {
                trace!("line matched {} dialect: {}", dialect, line);
                return Some(RecognizedItem { dialect, item });
            }
        }

        debug!("no dialect matched line: {}", line);
        None
    }

    /// Recognize one line. Unrecognized lines yield `None`, never an error.
    pub fn parse_item(&self, line: &str) -> Option<LineItem> {
        self.recognize(line).map(|recognized| recognized.item)
    }
}

impl Default for ItemRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
