//! Canonical item lines: `<name> <qty>[ x <mult>] [<unit>] × <price>[₽]`.

use super::patterns::CANONICAL_ITEM;
use super::{build_item, parse_price, parse_quantity, Dialect, ItemMatcher, MatchContext};
use crate::models::act::LineItem;

/// Matcher for the canonical dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalMatcher;

impl ItemMatcher for CanonicalMatcher {
    fn dialect(&self) -> Dialect {
        Dialect::Canonical
    }

    fn match_line(&self, line: &str, ctx: &MatchContext<'_>) -> Option<LineItem> {
        let caps = CANONICAL_ITEM.captures(line)?;

        let quantity = parse_quantity(&caps["quantity"])?;
        let price = parse_price(&caps["price"])?;
        let unit = match caps.name("unit") {
            Some(unit) => ctx.units.normalize(unit.as_str()),
            None => ctx.default_unit.to_string(),
        };

        build_item(self.dialect(), &caps["name"], quantity, unit, price)
    }
}
