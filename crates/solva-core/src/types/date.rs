//! Date type for observations and reports.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SolvaError, SolvaResult};

/// A calendar date.
///
/// Newtype wrapper around `chrono::NaiveDate`, used to key price observations
/// and to stamp solvency reports.
///
/// # Example
///
/// ```rust
/// use solva_core::types::Date;
///
/// let date = Date::parse("2024-06-28").unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.add_days(3).to_string(), "2024-07-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> SolvaResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| SolvaError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// A trailing time component (`2024-01-02 00:00:00`), as written by
    /// spreadsheet exports, is ignored.
    ///
    /// # Errors
    ///
    /// Returns `SolvaError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> SolvaResult<Self> {
        let trimmed = s.trim();
        let day_part = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);
        NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| SolvaError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}
