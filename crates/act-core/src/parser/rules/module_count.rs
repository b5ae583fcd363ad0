//! Name-first module lines: `<name>, N модулей по <price>`.

use super::patterns::{MODULE_COUNT, TRAILING_MULTIPLIER};
use super::{build_item, parse_number, Dialect, ItemMatcher, MatchContext};
use crate::models::act::LineItem;

/// Unit assigned to module-count lines.
pub const MODULE_UNIT: &str = "мод.";

/// Matcher for rack/module style lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleCountMatcher;

impl ItemMatcher for ModuleCountMatcher {
    fn dialect(&self) -> Dialect {
        Dialect::ModuleCount
    }

    fn match_line(&self, line: &str, ctx: &MatchContext<'_>) -> Option<LineItem> {
        let caps = MODULE_COUNT.captures(line)?;
        let name = caps["name"].trim();
        // "Стойка 2 x" followed by the quantity would read as a multiplier
        if TRAILING_MULTIPLIER.is_match(name) {
            return None;
        }

        let quantity = parse_number(&caps["quantity"])?;
        let price = parse_number(&caps["price"])?;

        build_item(
            self.dialect(),
            name,
            quantity,
            ctx.units.normalize(MODULE_UNIT),
            price,
        )
    }
}
