//! Human-readable and canonical text forms of an act.

mod canonical;
mod preview;

pub use canonical::render_canonical;
pub use preview::{render_preview, PreviewFormatter};

use rust_decimal::Decimal;

use crate::models::act::round_amount;

/// Date format used in headers, previews and documents.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Format an amount for display (1 234.5, 3 000).
///
/// Rounds to two places, groups thousands with a space and strips trailing
/// zeros together with a dangling decimal point.
pub fn format_amount(value: Decimal) -> String {
    let s = format!("{:.2}", round_amount(value));
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s, ""));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::from(sign);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    let decimal_part = decimal_part.trim_end_matches('0');
    if !decimal_part.is_empty() {
        formatted.push('.');
        formatted.push_str(decimal_part);
    }
    formatted
}

/// Format an amount with exactly two decimals (3000.00).
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_amount(value))
}

/// Format a number so that the line parser reads it back unchanged.
///
/// No grouping and no rounding; trailing zeros are dropped.
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("3000")), "3 000");
        assert_eq!(format_amount(dec("1234567.891")), "1 234 567.89");
        assert_eq!(format_amount(dec("1234.50")), "1 234.5");
        assert_eq!(format_amount(dec("999.999")), "1 000");
        assert_eq!(format_amount(dec("0.5")), "0.5");
        assert_eq!(format_amount(dec("12")), "12");
        assert_eq!(format_amount(dec("-1500")), "-1 500");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec("3000")), "3000.00");
        assert_eq!(format_money(dec("0.125")), "0.13");
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(dec("1500")), "1500");
        assert_eq!(format_plain(dec("1500.00")), "1500");
        assert_eq!(format_plain(dec("2.50")), "2.5");
        assert_eq!(format_plain(dec("33.333")), "33.333");
    }
}
