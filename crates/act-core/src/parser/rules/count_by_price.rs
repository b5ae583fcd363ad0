//! Count-first item lines: `N <name> по <price>`.

use super::patterns::COUNT_BY_PRICE;
use super::shift_rate::shift_count;
use super::{build_item, count_first_name, parse_number, Dialect, ItemMatcher, MatchContext};
use crate::models::act::LineItem;

/// Matcher for `3 камеры по 2000₽` style lines.
///
/// Lines whose remainder names a shift count (`... 3 ночи`) are left to
/// [`ShiftRateMatcher`](super::ShiftRateMatcher).
#[derive(Debug, Clone, Copy, Default)]
pub struct CountByPriceMatcher;

impl ItemMatcher for CountByPriceMatcher {
    fn dialect(&self) -> Dialect {
        Dialect::CountByPrice
    }

    fn match_line(&self, line: &str, ctx: &MatchContext<'_>) -> Option<LineItem> {
        let caps = COUNT_BY_PRICE.captures(line)?;
        let matched = caps.get(0)?;
        if shift_count(&line[matched.end()..]).is_some() {
            return None;
        }

        let quantity = parse_number(&caps["quantity"])?;
        let price = parse_number(&caps["price"])?;
        let name = count_first_name(&caps["name"]);

        build_item(
            self.dialect(),
            name,
            quantity,
            ctx.default_unit.to_string(),
            price,
        )
    }
}
