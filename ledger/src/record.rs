//! Sales record and its validated order date.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use snafu::Snafu;

/// A date that failed `YYYY-MM-DD` validation.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(display("invalid order date {value:?}: expected YYYY-MM-DD"))]
pub struct DateError {
    /// The rejected input.
    pub value: String,
}

/// Calendar date of an order, validated `YYYY-MM-DD`.
///
/// Stored as components so month bucketing never re-parses the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct OrderDate {
    year: u16,
    month: u8,
    day: u8,
}

impl OrderDate {
    /// Build a date from components.
    ///
    /// # Errors
    /// Rejects out-of-range months and days (day-in-month is checked
    /// against 31, not the exact month length).
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(DateError {
                value: format!("{year:04}-{month:02}-{day:02}"),
            });
        }
        Ok(Self { year, month, day })
    }

    /// `YYYY-MM` bucket key for monthly aggregation.
    #[must_use]
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for OrderDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        let err = || DateError {
            value: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(err());
        }
        let year: u16 = s[0..4].parse().map_err(|_| err())?;
        let month: u8 = s[5..7].parse().map_err(|_| err())?;
        let day: u8 = s[8..10].parse().map_err(|_| err())?;
        Self::new(year, month, day).map_err(|_| err())
    }
}

impl TryFrom<String> for OrderDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, DateError> {
        value.parse()
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// One row of a Superstore-style sales CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleRecord {
    /// Order identifier, unique per row in well-formed data.
    pub order_id: String,
    /// Date the order was placed.
    pub order_date: OrderDate,
    /// Sales region.
    pub region: String,
    /// Top-level product category.
    pub category: String,
    /// Product subcategory.
    pub subcategory: String,
    /// Sale amount in dollars.
    pub sales: f64,
    /// Units sold.
    pub quantity: u32,
    /// Profit in dollars (may be negative).
    pub profit: f64,
}
