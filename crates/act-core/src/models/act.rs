//! Act data model: billable line items and the parsed act record.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{ItemError, ParseError};

/// Unit used when a line does not name one.
pub const DEFAULT_UNIT: &str = "шт.";

/// Price difference below which two items are considered the same entry.
fn price_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Round a money amount to two decimal places.
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One billable entry of an act.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    name: String,
    quantity: Decimal,
    unit: String,
    price: Decimal,
}

impl LineItem {
    /// Create a validated item.
    ///
    /// The name is trimmed and must not be empty; quantity and unit price must
    /// be strictly positive and their product must fit a `Decimal`.
    pub fn new(
        name: impl AsRef<str>,
        quantity: Decimal,
        unit: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ItemError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ItemError::EmptyName);
        }
        if quantity <= Decimal::ZERO {
            return Err(ItemError::NotPositive {
                field: "quantity",
                value: quantity.to_string(),
            });
        }
        if price <= Decimal::ZERO {
            return Err(ItemError::NotPositive {
                field: "price",
                value: price.to_string(),
            });
        }
        if quantity.checked_mul(price).is_none() {
            return Err(ItemError::Overflow);
        }

        let unit = unit.into();
        let unit = if unit.trim().is_empty() {
            DEFAULT_UNIT.to_string()
        } else {
            unit.trim().to_string()
        };

        Ok(Self {
            name: name.to_string(),
            quantity,
            unit,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Unit price (not the line total).
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Quantity times unit price, rounded to two places.
    pub fn line_total(&self) -> Decimal {
        round_amount(self.quantity * self.price)
    }

    /// Whether `other` describes the same entry: case-insensitive name and
    /// unit, price within 0.01. Quantity is ignored.
    pub fn is_duplicate_of(&self, other: &LineItem) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
            && self.unit.to_lowercase() == other.unit.to_lowercase()
            && (self.price - other.price).abs() < price_tolerance()
    }
}

/// A fully parsed completed-work act.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActRecord {
    date: NaiveDate,
    object_name: String,
    items: Vec<LineItem>,
}

impl ActRecord {
    /// Create an act from its parts.
    ///
    /// Fails with [`ParseError::NoItems`] when `items` is empty and with
    /// [`ParseError::MalformedHeader`] when the object name is blank.
    pub fn new(
        date: NaiveDate,
        object_name: impl AsRef<str>,
        items: Vec<LineItem>,
    ) -> Result<Self, ParseError> {
        let object_name = object_name.as_ref().trim();
        if object_name.is_empty() {
            return Err(ParseError::MalformedHeader {
                line: String::new(),
            });
        }
        if items.is_empty() {
            return Err(ParseError::NoItems);
        }

        items
            .iter()
            .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.line_total()))
            .ok_or(ParseError::TotalOverflow)?;

        Ok(Self {
            date,
            object_name: object_name.to_string(),
            items,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    /// Items in input order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of line totals, rounded to two places.
    pub fn total(&self) -> Decimal {
        round_amount(self.items.iter().map(LineItem::line_total).sum())
    }
}
