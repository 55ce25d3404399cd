//! Wall-clock times and same-day durations.
//!
//! Pointage entries and lateness records carry `"HH:MM"` strings with no
//! date. Durations are only defined within one calendar day: an exit at or
//! before the entry (including a shift that runs past midnight) yields zero.
//! Supporting night shifts needs distinct entry/exit dates on the record,
//! not a special case in the hour comparison.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::error::{MetricsError, Result};

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClockTime {
    hours: u32,
    minutes: u32,
}

impl ClockTime {
    /// Build a clock time, rejecting hours above 23 or minutes above 59.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidTime`] for out-of-range components.
    pub fn new(hours: u32, minutes: u32) -> Result<Self> {
        if hours > 23 || minutes > 59 {
            return Err(MetricsError::InvalidTime(format!(
                "{hours:02}:{minutes:02} is out of range"
            )));
        }
        Ok(Self { hours, minutes })
    }

    /// Parse `"HH:MM"` (or `"HH:MM:SS"`, seconds ignored).
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidTime`] for empty, malformed, or
    /// out-of-range input.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MetricsError::InvalidTime("empty time".to_string()));
        }
        let time = NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .map_err(|e| MetricsError::InvalidTime(format!("'{s}': {e}")))?;
        Self::new(time.hour(), time.minute())
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Non-negative elapsed time between two clock times on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct ClockDuration {
    minutes: u32,
}

impl ClockDuration {
    pub fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    /// Elapsed time from `start` to `end`, or zero unless `end` is strictly later.
    pub fn between(start: ClockTime, end: ClockTime) -> Self {
        let minutes = end
            .minutes_since_midnight()
            .saturating_sub(start.minutes_since_midnight());
        Self { minutes }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Decimal hours rounded to two places.
    pub fn hours(&self) -> f64 {
        minutes_to_hours(self.minutes)
    }

    pub fn is_zero(&self) -> bool {
        self.minutes == 0
    }
}

/// Convert a minute count to decimal hours rounded to two places.
pub fn minutes_to_hours(minutes: u32) -> f64 {
    (f64::from(minutes) / 60.0 * 100.0).round() / 100.0
}

/// Hours worked between an entry and an exit time on the same day.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidTime`] if either string cannot be parsed.
///
/// # Examples
///
/// ```
/// use hr_metrics::hours_between;
///
/// assert_eq!(hours_between("09:00", "17:30").unwrap(), 8.5);
/// // Overnight shifts are not supported and yield zero.
/// assert_eq!(hours_between("22:00", "06:00").unwrap(), 0.0);
/// ```
pub fn hours_between(entry: &str, exit: &str) -> Result<f64> {
    let entry = ClockTime::parse(entry)?;
    let exit = ClockTime::parse(exit)?;
    Ok(ClockDuration::between(entry, exit).hours())
}

/// Minutes between a scheduled arrival and the actual one; zero when on time or early.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidTime`] if either string cannot be parsed.
pub fn minutes_late(scheduled: &str, actual: &str) -> Result<u32> {
    let scheduled = ClockTime::parse(scheduled)?;
    let actual = ClockTime::parse(actual)?;
    Ok(ClockDuration::between(scheduled, actual).minutes())
}
