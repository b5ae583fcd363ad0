//! Numeric token parsing for act lines.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a plain number token, accepting `,` as the decimal separator.
///
/// Trailing dots (left over from stripped abbreviations such as `руб.`) are
/// ignored. Negative values are rejected.
pub fn parse_number(token: &str) -> Option<Decimal> {
    let normalized = token.trim().replace(',', ".");
    let normalized = normalized.trim_end_matches('.');
    if normalized.is_empty() {
        return None;
    }

    Decimal::from_str(normalized)
        .ok()
        .filter(|value| !value.is_sign_negative())
}

/// Parse a quantity token, optionally carrying an inline multiplier
/// (`3 x 100`, `2х5`). Both Latin and Cyrillic `x` are accepted.
pub fn parse_quantity(token: &str) -> Option<Decimal> {
    let mut parts = token.splitn(2, |c: char| matches!(c, 'x' | 'X' | 'х' | 'Х'));
    let base = parse_number(parts.next()?)?;

    match parts.next() {
        Some(multiplier) => base.checked_mul(parse_number(multiplier)?),
        None => Some(base),
    }
}

/// Parse a price token after dropping currency marks and trailing words.
pub fn parse_price(token: &str) -> Option<Decimal> {
    let digits: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    parse_number(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1500"), Some(dec("1500")));
        assert_eq!(parse_number("2,5"), Some(dec("2.5")));
        assert_eq!(parse_number("2.5"), Some(dec("2.5")));
        assert_eq!(parse_number("500."), Some(dec("500")));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1.500,00"), None);
        assert_eq!(parse_number("-3"), None);
    }

    #[test]
    fn test_parse_quantity_with_multiplier() {
        assert_eq!(parse_quantity("3 x 100"), Some(dec("300")));
        assert_eq!(parse_quantity("3х100"), Some(dec("300")));
        assert_eq!(parse_quantity("2,5 X 4"), Some(dec("10")));
        assert_eq!(parse_quantity("7"), Some(dec("7")));
        assert_eq!(parse_quantity("3 x "), None);
    }

    #[test]
    fn test_parse_price_strips_currency() {
        assert_eq!(parse_price("2000₽"), Some(dec("2000")));
        assert_eq!(parse_price("500 руб."), Some(dec("500")));
        assert_eq!(parse_price("1 234,50 р"), Some(dec("1234.50")));
        assert_eq!(parse_price("р."), None);
    }
}
