//! Count-first item lines priced per shift: `N <name> по <price> ... K ночи`.

use rust_decimal::Decimal;

use super::patterns::{COUNT_BY_PRICE, SHIFT_COUNT};
use super::{build_item, count_first_name, parse_number, Dialect, ItemMatcher, MatchContext};
use crate::models::act::LineItem;

/// Number of nights/shifts/days mentioned in `text`, if any.
pub fn shift_count(text: &str) -> Option<Decimal> {
    let caps = SHIFT_COUNT.captures(text)?;
    parse_number(&caps["count"])
}

/// Matcher for flat nightly rates multiplied by a shift count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftRateMatcher;

impl ItemMatcher for ShiftRateMatcher {
    fn dialect(&self) -> Dialect {
        Dialect::ShiftRate
    }

    fn match_line(&self, line: &str, ctx: &MatchContext<'_>) -> Option<LineItem> {
        let caps = COUNT_BY_PRICE.captures(line)?;
        let matched = caps.get(0)?;
        let shifts = shift_count(&line[matched.end()..])?;

        let quantity = parse_number(&caps["quantity"])?;
        let price = parse_number(&caps["price"])?.checked_mul(shifts)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::rules::UnitTable;

    fn matches(line: &str) -> Option<LineItem> {
        let units = UnitTable::new();
        let ctx = MatchContext {
            units: &units,
            default_unit: "шт.",
        };
        ShiftRateMatcher.match_line(line, &ctx)
    }

    #[test]
    fn test_shift_count() {
        assert_eq!(shift_count("за 3 ночи"), Some(Decimal::from(3)));
        assert_eq!(shift_count("2 СМЕНЫ"), Some(Decimal::from(2)));
        assert_eq!(shift_count("4 суток"), Some(Decimal::from(4)));
        assert_eq!(shift_count("три смены"), None);
    }

    #[test]
    fn test_price_multiplied_by_shifts() {
        let item = matches("2 охранника по 3000 за смену, 3 смены").unwrap();
        assert_eq!(item.name(), "охранника");
        assert_eq!(item.quantity(), Decimal::from(2));
        assert_eq!(item.price(), Decimal::from(9000));
        assert_eq!(item.line_total(), Decimal::from(18000));
    }

    #[test]
    fn test_leading_count_is_not_a_shift_count() {
        assert!(matches("3 смены по 5000").is_none());
    }
}
