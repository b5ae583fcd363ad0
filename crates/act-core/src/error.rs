//! Error types for the act-core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;

/// Example header shown to users when the act text cannot be parsed.
pub const HEADER_TEMPLATE: &str = "#АКТ 10.06.2025 | Объект: Название объекта";

/// Example item line shown together with [`HEADER_TEMPLATE`].
pub const ITEM_TEMPLATE: &str = "Услуги по уборке 1 кв.м. × 1500";

/// Main error type for the act library.
#[derive(Error, Debug)]
pub enum ActError {
    /// Act text could not be turned into a record.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Document rendering failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Session flow error.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Broad failure classes of act parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The header line or its date is malformed.
    Format,
    /// Nothing usable was found in the text.
    EmptyAct,
}

/// Errors raised while assembling an act from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The first line does not look like an act header.
    #[error("invalid header `{line}`, expected: {expected}", expected = HEADER_TEMPLATE)]
    MalformedHeader { line: String },

    /// The header date token is not a valid DD.MM.YYYY date.
    #[error("invalid date `{token}`, use DD.MM.YYYY")]
    InvalidDate { token: String },

    /// The text has no non-blank lines.
    #[error("act is empty")]
    NoLines,

    /// No item line was recognized.
    #[error("no line items found in act")]
    NoItems,

    /// The act total does not fit the amount type.
    #[error("act total is too large")]
    TotalOverflow,
}

impl ParseError {
    /// Classify the error as a format or an empty-act failure.
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::MalformedHeader { .. } | ParseError::InvalidDate { .. } => {
                ParseErrorKind::Format
            }
            ParseError::NoLines | ParseError::NoItems | ParseError::TotalOverflow => {
                ParseErrorKind::EmptyAct
            }
        }
    }

    /// Expected input shape, to be shown next to the error message.
    pub fn hint(&self) -> String {
        format!("Пример:\n{}\n{}", HEADER_TEMPLATE, ITEM_TEMPLATE)
    }
}

/// Validation failure of a single line item candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("item name is empty")]
    EmptyName,

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: String },

    #[error("line total overflows")]
    Overflow,
}

/// Errors raised by document renderers.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The configured template exists but cannot be read.
    #[error("failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the rendered document failed.
    #[error("failed to write document: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors raised by the session store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Confirmation requested but nothing was parsed yet.
    #[error("no act is waiting for confirmation")]
    NoPendingAct,

    /// The operation is not allowed in the current state.
    #[error("operation not allowed while session is {actual}")]
    InvalidState { actual: SessionState },

    /// The submitted text did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for the act library.
pub type Result<T> = std::result::Result<T, ActError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_kinds() {
        let header = ParseError::MalformedHeader {
            line: "hello".to_string(),
        };
        assert_eq!(header.kind(), ParseErrorKind::Format);
        assert_eq!(
            ParseError::InvalidDate {
                token: "31.02.2024".to_string()
            }
            .kind(),
            ParseErrorKind::Format
        );
        assert_eq!(ParseError::NoLines.kind(), ParseErrorKind::EmptyAct);
        assert_eq!(ParseError::NoItems.kind(), ParseErrorKind::EmptyAct);
    }

    #[test]
    fn test_header_error_mentions_template() {
        let err = ParseError::MalformedHeader {
            line: "АКТ без решётки".to_string(),
        };
        assert!(err.to_string().contains(HEADER_TEMPLATE));
        assert!(err.hint().contains(ITEM_TEMPLATE));
    }
}
