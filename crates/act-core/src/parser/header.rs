//! Header line recognition: `#АКТ <date> | Объект: <name>`.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::ParseError;

use super::rules::patterns::HEADER;
use super::sanitizer::Sanitizer;

/// Date and object name taken from the first line of an act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActHeader {
    pub date: NaiveDate,
    pub object_name: String,
}

/// Parse the header line.
///
/// There is no fallback shape: a line that does not match the template is a
/// [`ParseError::MalformedHeader`]. The object name is trimmed and passed
/// through `sanitizer`.
pub fn parse_header(line: &str, sanitizer: &Sanitizer) -> Result<ActHeader, ParseError> {
    let line = line.trim();
    let caps = HEADER.captures(line).ok_or_else(|| ParseError::MalformedHeader {
        line: line.to_string(),
    })?;

    let date = parse_date(&caps["date"])?;

    let object_name = caps["object_name"].trim();
    if object_name.is_empty() {
        return Err(ParseError::MalformedHeader {
            line: line.to_string(),
        });
    }
    let object_name = sanitizer.sanitize(object_name);

    debug!("header: date={}, object={}", date, object_name);
    Ok(ActHeader { date, object_name })
}

/// Parse a `D.M.YYYY` token strictly as day, month, four-digit year.
///
/// `/` is accepted in place of `.`.
pub fn parse_date(token: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::InvalidDate {
        token: token.to_string(),
    };

    let normalized = token.trim().replace('/', ".");
    let parts: Vec<&str> = normalized.split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(invalid());
    };
    if year.len() != 4 {
        return Err(invalid());
    }

    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
