//! Act assembly: header, item cascade, deduplication and validation.

use std::borrow::Cow;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::error::ParseError;
use crate::models::act::{ActRecord, LineItem};
use crate::models::config::ActConfig;

use super::header::parse_header;
use super::rules::{Dialect, ItemRecognizer};
use super::sanitizer::Sanitizer;
use super::{ActParser, Result};

/// A source line that produced no item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    /// 1-based line number in the submitted text.
    pub line_no: usize,
    pub text: String,
}

/// A recognized item dropped as a repeat of an earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateLine {
    pub line_no: usize,
    pub text: String,
    /// Line number of the item that was kept.
    pub duplicate_of: usize,
}

/// Outcome of parsing one act text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedAct {
    pub act: ActRecord,
    /// Dialect of every kept item, in item order.
    pub dialects: Vec<Dialect>,
    /// Non-comment lines no dialect recognized.
    pub skipped: Vec<SourceLine>,
    pub duplicates: Vec<DuplicateLine>,
    /// Whether the sanitizer replaced anything.
    pub sanitized: bool,
}

impl ParsedAct {
    /// Whether every item line was used.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.duplicates.is_empty()
    }
}

/// Rule-based act parser.
#[derive(Debug, Clone, Default)]
pub struct RuleActParser {
    sanitizer: Sanitizer,
    recognizer: ItemRecognizer,
}

impl RuleActParser {
    /// Create a parser with default sanitizer and recognizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ActConfig) -> Self {
        Self {
            sanitizer: Sanitizer::from_config(&config.sanitizer),
            recognizer: ItemRecognizer::from_config(&config.parser),
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn with_recognizer(mut self, recognizer: ItemRecognizer) -> Self {
        self.recognizer = recognizer;
        self
    }
}

impl ActParser for RuleActParser {
    fn parse(&self, text: &str) -> Result<ParsedAct> {
        // No annotation here: it would be glued to the last item line.
        let cleaned = self.sanitizer.replace_phrases(text);
        let sanitized = matches!(cleaned, Cow::Owned(_));

        // Substitution keeps line breaks, so raw and cleaned lines pair up.
        let mut lines = text
            .lines()
            .zip(cleaned.lines())
            .enumerate()
            .map(|(idx, (raw, clean))| (idx + 1, raw.trim(), clean.trim()))
            .filter(|(_, _, clean)| !clean.is_empty());

        let (_, header_line, _) = lines.next().ok_or(ParseError::NoLines)?;
        // The header goes through the full sanitizer so the object name
        // carries the annotation when it was changed.
        let header = parse_header(header_line, &self.sanitizer)?;

        let mut kept: Vec<(usize, Dialect, LineItem)> = Vec::new();
        let mut skipped = Vec::new();
        let mut duplicates = Vec::new();

        for (line_no, _, line) in lines {
            if line.starts_with('#') {
                trace!("line {}: comment", line_no);
                continue;
            }

            let Some(recognized) = self.recognizer.recognize(line) else {
                warn!("line {}: not recognized, skipped: {}", line_no, line);
                skipped.push(SourceLine {
                    line_no,
                    text: line.to_string(),
                });
                continue;
            };

            let earlier = kept
                .iter()
                .find(|(_, _, item)| recognized.item.is_duplicate_of(item))
                .map(|(kept_line, _, _)| *kept_line);

            match earlier {
                Some(duplicate_of) => {
                    debug!("line {}: duplicate of line {}", line_no, duplicate_of);
                    duplicates.push(DuplicateLine {
                        line_no,
                        text: line.to_string(),
                        duplicate_of,
                    });
                }
                None => kept.push((line_no, recognized.dialect, recognized.item)),
            }
        }

        if kept.is_empty() {
            return Err(ParseError::NoItems);
        }

        let (dialects, items): (Vec<Dialect>, Vec<LineItem>) = kept
            .into_iter()
            .map(|(_, dialect, item)| (dialect, item))
            .unzip();
        let act = ActRecord::new(header.date, header.object_name, items)?;

        info!(
            "parsed act {} for '{}': {} items, {} skipped, {} duplicates, total {}",
            act.date(),
            act.object_name(),
            act.items().len(),
            skipped.len(),
            duplicates.len(),
            act.total()
        );

        Ok(ParsedAct {
            act,
            dialects,
            skipped,
            duplicates,
            sanitized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn parse(text: &str) -> Result<ParsedAct> {
        RuleActParser::new().parse(text)
    }

    #[test]
    fn test_office_act() {
        let text = "#АКТ 12.05.2024 | Объект: Офис на Невском проспекте\n\
                    Услуги по уборке 1 кв.м. × 1500\n\
                    Мытье окон 3 шт. × 500";
        let parsed = parse(text).unwrap();
        let act = &parsed.act;

        assert_eq!(act.date(), NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
        assert_eq!(act.object_name(), "Офис на Невском проспекте");

        let expected = vec![
            LineItem::new("Услуги по уборке", dec("1"), "кв.м.", dec("1500")).unwrap(),
            LineItem::new("Мытье окон", dec("3"), "шт.", dec("500")).unwrap(),
        ];
        assert_eq!(act.items(), expected.as_slice());
        assert_eq!(act.total(), dec("3000"));
        assert_eq!(parsed.dialects, vec![Dialect::Canonical, Dialect::Canonical]);
        assert!(parsed.is_clean());
        assert!(!parsed.sanitized);
    }

    #[test]
    fn test_mixed_dialects() {
        let text = "#АКТ 01.03.2025 | Объект: Склад\n\
                    3 камеры по 2000₽\n\
                    4 смены по 5000, за 3 смены\n\
                    стойка слабаточная, 18 модулей по 1000р";
        let parsed = parse(text).unwrap();

        assert_eq!(
            parsed.dialects,
            vec![Dialect::CountByPrice, Dialect::ShiftRate, Dialect::ModuleCount]
        );
        assert_eq!(parsed.act.total(), dec("6000") + dec("60000") + dec("18000"));
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let text = "#АКТ 01.06.2024 | Объект: Склад\n\
                    Мытье окон 3 шт. × 500\n\
                    Уборка 2 × 1000\n\
                    мытье ОКОН 5 шт. × 500";
        let parsed = parse(text).unwrap();

        let items = parsed.act.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name(), "Мытье окон");
        assert_eq!(items[0].quantity(), dec("3"));
        assert_eq!(items[1].name(), "Уборка");
        assert_eq!(
            parsed.duplicates,
            vec![DuplicateLine {
                line_no: 4,
                text: "мытье ОКОН 5 шт. × 500".to_string(),
                duplicate_of: 2,
            }]
        );
    }

    #[test]
    fn test_skipped_lines_and_comments() {
        let text = "\n#АКТ 01.06.2024 | Объект: Склад\n\
                    # заметка для себя\n\
                    Уборка 2 × 1000\n\
                    \n\
                    Просто заметка\n";
        let parsed = parse(text).unwrap();

        assert_eq!(parsed.act.items().len(), 1);
        assert_eq!(
            parsed.skipped,
            vec![SourceLine {
                line_no: 6,
                text: "Просто заметка".to_string(),
            }]
        );
        assert!(!parsed.is_clean());
    }

    #[test]
    fn test_empty_acts() {
        assert_eq!(parse(""), Err(ParseError::NoLines));
        assert_eq!(parse("  \n\t\n"), Err(ParseError::NoLines));
        assert_eq!(
            parse("#АКТ 12.05.2024 | Объект: Офис\n\n# только комментарий\nничего"),
            Err(ParseError::NoItems)
        );
        assert_eq!(
            parse("#АКТ 12.05.2024 | Объект: Офис"),
            Err(ParseError::NoItems)
        );
    }

    #[test]
    fn test_header_errors_propagate() {
        let err = parse("Офис 12.05.2024\nУборка 2 × 1000").unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader { .. }));

        let err = parse("#АКТ 30.02.2024 | Объект: Офис\nУборка 2 × 1000").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidDate {
                token: "30.02.2024".to_string()
            }
        );
    }

    #[test]
    fn test_sanitized_items_carry_no_annotation() {
        let text = "#АКТ 12.05.2024 | Объект: Лофт\nКальян 2 шт. × 500";
        let parsed = parse(text).unwrap();

        assert!(parsed.sanitized);
        assert_eq!(parsed.act.object_name(), "Лофт");
        assert_eq!(parsed.act.items()[0].name(), "оборудование");
        assert_eq!(parsed.act.items()[0].quantity(), dec("2"));
    }

    #[test]
    fn test_config_is_applied() {
        let mut config = ActConfig::default();
        config.sanitizer.enabled = false;
        config.parser.default_unit = "усл.".to_string();

        let parsed = RuleActParser::from_config(&config)
            .parse("#АКТ 12.05.2024 | Объект: Лофт\nКальян 2 × 500")
            .unwrap();
        assert!(!parsed.sanitized);
        assert_eq!(parsed.act.items()[0].name(), "Кальян");
        assert_eq!(parsed.act.items()[0].unit(), "усл.");
    }

    #[test]
    fn test_parse_act_returns_record_only() {
        let act = RuleActParser::new()
            .parse_act("#АКТ 12.05.2024 | Объект: Офис\nУборка 2 × 1000")
            .unwrap();
        assert_eq!(act.total(), dec("2000"));
    }
}
