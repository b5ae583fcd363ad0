//! Common regex patterns for act text recognition.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "#АКТ 12.05.2024 | Объект: Офис на Невском"
    pub static ref HEADER: Regex = Regex::new(
        r"(?i)^#АКТ\s+(?P<date>\d{1,2}[./]\d{1,2}[./]\d{2,4})\s*\|\s*Объект:\s*(?P<object_name>.+)"
    ).unwrap();

    // "<name> <qty>[ x <mult>] [<unit> [<word>]] × <price>[₽]"
    pub static ref CANONICAL_ITEM: Regex = Regex::new(concat!(
        r"(?i)^(?P<name>.+?)\s+",
        r"(?P<quantity>\d+(?:[.,]\d+)?(?:\s*[xх]\s*\d+(?:[.,]\d+)?)?)",
        r"(?:\s*(?P<unit>[а-яa-z.]+)(?:\s+[а-яa-z.]*)?)?",
        r"\s*[×x*]\s*",
        r"(?P<price>\d+(?:[.,]\d+)?(?:\s*[₽р]?\s*[а-яa-z.]*)?)",
        r"\s*(?:[₽р]|$)",
    )).unwrap();

    // "3 камеры по 2000₽", "5 часов: 700"
    pub static ref COUNT_BY_PRICE: Regex = Regex::new(
        r"(?i)^(?P<quantity>\d+)\s+(?P<name>[^\d]+)(?:по|:)\s*(?P<price>\d+(?:[.,]\d+)?)"
    ).unwrap();

    // "... 3 ночи", "... 2 смены", "... 4 суток"
    pub static ref SHIFT_COUNT: Regex = Regex::new(
        r"(?i)(?P<count>\d+)\s+(?:ноч|смен|сут)"
    ).unwrap();

    // "стойка слабаточная, 18 модулей по 1000р"
    pub static ref MODULE_COUNT: Regex = Regex::new(concat!(
        r"(?i)^(?P<name>.+?)[,;]\s*(?P<quantity>\d+)\s+(?:модул[а-я]*|мод\.?|шт\.?)",
        r"\s*(?:по|:)?\s*(?P<price>\d+(?:[.,]\d+)?)",
    )).unwrap();

    // Name tail that reads as "<qty> x" once a quantity follows it: "Стойка 2 x"
    pub static ref TRAILING_MULTIPLIER: Regex = Regex::new(
        r"(?i)\d+(?:[.,]\d+)?\s*[xх]$"
    ).unwrap();

    // A unit the canonical pattern can read back: "шт.", "кв.м.", "мод."
    pub static ref UNIT_TOKEN: Regex = Regex::new(r"(?i)^[а-яa-z.]+$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_captures() {
        let caps = HEADER
            .captures("#акт 1/5/2024 | объект: Склад №2")
            .unwrap();
        assert_eq!(&caps["date"], "1/5/2024");
        assert_eq!(&caps["object_name"], "Склад №2");
    }

    #[test]
    fn test_canonical_prefers_inline_multiplier() {
        let caps = CANONICAL_ITEM.captures("Item 3 x 100 × 50").unwrap();
        assert_eq!(&caps["name"], "Item");
        assert_eq!(&caps["quantity"], "3 x 100");
        assert!(caps.name("unit").is_none());
        assert_eq!(&caps["price"], "50");
    }

    #[test]
    fn test_canonical_falls_back_to_x_separator() {
        let caps = CANONICAL_ITEM.captures("Услуга 3 x 1000").unwrap();
        assert_eq!(&caps["name"], "Услуга");
        assert_eq!(&caps["quantity"], "3");
        assert_eq!(&caps["price"], "1000");
    }

    #[test]
    fn test_count_by_price_takes_last_separator() {
        let caps = COUNT_BY_PRICE.captures("3 камеры по 2000₽").unwrap();
        assert_eq!(&caps["quantity"], "3");
        assert_eq!(&caps["name"], "камеры ");
        assert_eq!(&caps["price"], "2000");
    }

    #[test]
    fn test_module_count_accepts_word_forms() {
        for line in [
            "стойка, 18 модулей по 1000р",
            "стойка; 18 мод. по 1000",
            "стойка, 18 шт: 1000",
        ] {
            let caps = MODULE_COUNT.captures(line).unwrap();
            assert_eq!(&caps["name"], "стойка", "{line}");
            assert_eq!(&caps["quantity"], "18", "{line}");
            assert_eq!(&caps["price"], "1000", "{line}");
        }
    }

    #[test]
    fn test_trailing_multiplier() {
        assert!(TRAILING_MULTIPLIER.is_match("Стойка 2 x"));
        assert!(TRAILING_MULTIPLIER.is_match("Стойка 2,5Х"));
        assert!(!TRAILING_MULTIPLIER.is_match("Стойка x"));
        assert!(!TRAILING_MULTIPLIER.is_match("Стойка 2"));
    }

    #[test]
    fn test_unit_token() {
        assert!(UNIT_TOKEN.is_match("кв.м."));
        assert!(UNIT_TOKEN.is_match("Усл."));
        assert!(!UNIT_TOKEN.is_match("м2"));
        assert!(!UNIT_TOKEN.is_match("кв м"));
    }
}
