//! Calendar date ranges and defensive date parsing.
//!
//! Records arrive from the REST API with string-typed date fields, usually
//! `YYYY-MM-DD` but sometimes carrying a time of day or an offset. Every
//! accepted shape is reduced to a plain calendar date here, so that the
//! counters downstream never see a time component and never shift a day
//! because of a timezone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{MetricsError, Result};

/// Naive datetime layouts accepted after the plain-date and RFC 3339 attempts.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// An inclusive pair of calendar dates.
///
/// No ordering is enforced: a range whose `start` falls after its `end` is
/// *inverted* and every counter treats it as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from two calendar dates. Never fails.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Build a range from two datetimes, dropping the time of day.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hr_metrics::DateRange;
    ///
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(17, 45, 0).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap().and_hms_opt(8, 0, 0).unwrap();
    /// let range = DateRange::from_datetimes(start, end);
    /// assert_eq!(range.calendar_days(), 4);
    /// ```
    pub fn from_datetimes(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(start.date(), end.date())
    }

    /// Parse both ends with [`parse_date`].
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidDate`] naming the first end that fails.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(parse_date(start)?, parse_date(end)?))
    }

    /// Whether `start` falls after `end`.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Number of calendar days covered, both ends included. Zero when inverted.
    pub fn calendar_days(&self) -> u32 {
        if self.is_inverted() {
            return 0;
        }
        // Inclusive span, so a one-day range counts 1.
        (self.end - self.start).num_days() as u32 + 1
    }

    /// Calendar year of the start date, used for year scoping.
    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    /// Zero-based month index (0 = January) of the start date.
    pub fn start_month_index(&self) -> usize {
        self.start.month0() as usize
    }
}

/// Parse an API date field into a calendar date.
///
/// Accepts, after trimming surrounding whitespace:
///
/// - `YYYY-MM-DD`
/// - RFC 3339 (`2024-01-05T09:00:00+01:00`); the date is taken as written,
///   no conversion to UTC is applied
/// - naive datetimes (`2024-01-05T09:00:00`, `2024-01-05 09:00:00`, with
///   optional fractional seconds, or minutes precision)
///
/// # Errors
///
/// Returns [`MetricsError::InvalidDate`] for empty or unrecognised input.
///
/// # Examples
///
/// ```
/// use hr_metrics::range::parse_date;
///
/// let date = parse_date("2024-01-05T23:30:00-05:00").unwrap();
/// assert_eq!(date.to_string(), "2024-01-05");
/// assert!(parse_date("05/01/2024").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MetricsError::InvalidDate("empty date".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| MetricsError::InvalidDate(format!("'{s}'")))
}
