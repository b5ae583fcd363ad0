//! Act text parsing module.

mod assembler;
pub mod header;
pub mod rules;
pub mod sanitizer;

pub use assembler::{DuplicateLine, ParsedAct, RuleActParser, SourceLine};
pub use header::{parse_date, parse_header, ActHeader};
pub use rules::{Dialect, ItemMatcher, ItemRecognizer, RecognizedItem, CASCADE};
pub use sanitizer::Sanitizer;

use crate::error::ParseError;
use crate::models::act::{ActRecord, LineItem};

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Trait for act text parsers.
pub trait ActParser {
    /// Parse an act, reporting skipped and duplicate lines.
    fn parse(&self, text: &str) -> Result<ParsedAct>;

    /// Parse an act, keeping only the record.
    fn parse_act(&self, text: &str) -> Result<ActRecord> {
        self.parse(text).map(|parsed| parsed.act)
    }
}

/// Parse an act with the default rules.
pub fn parse_act(text: &str) -> Result<ActRecord> {
    RuleActParser::new().parse_act(text)
}

/// Recognize a single item line with the default rules.
pub fn parse_item(line: &str) -> Option<LineItem> {
    ItemRecognizer::new().parse_item(line)
}

/// Sanitize text with the default vocabulary table.
pub fn sanitize(text: &str) -> String {
    Sanitizer::new().sanitize(text)
}
