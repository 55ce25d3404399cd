//! Hours worked from pointage (clock-in / clock-out) records.
//!
//! Each record's hours come from [`ClockDuration`], so an exit at or before
//! the entry contributes zero. Sums are kept in whole minutes and converted
//! to two-decimal hours once at the end, which keeps repeated calls
//! bit-identical. Scoping follows the absence statistics: totals, count,
//! average and the monthly breakdown use the reference year, the longest
//! shift is taken over all records.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{minutes_to_hours, ClockDuration, ClockTime};
use crate::error::Result;
use crate::range::parse_date;
use crate::report::{accumulate, null_as_empty, SkippedRecord, MONTHS};

/// A pointage entry as delivered by the REST API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "dateJour",
        alias = "date_jour",
        alias = "jour"
    )]
    pub date: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "heureEntree",
        alias = "heure_entree",
        alias = "entree"
    )]
    pub entry: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "heureSortie",
        alias = "heure_sortie",
        alias = "sortie"
    )]
    pub exit: String,
}

impl TimeRecord {
    pub fn new(
        date: impl Into<String>,
        entry: impl Into<String>,
        exit: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            entry: entry.into(),
            exit: exit.into(),
        }
    }

    /// Parse the record into its calendar date and worked duration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MetricsError`] if the date or either time is malformed.
    pub fn worked(&self) -> Result<(NaiveDate, ClockDuration)> {
        let date = parse_date(&self.date)?;
        let entry = ClockTime::parse(&self.entry)?;
        let exit = ClockTime::parse(&self.exit)?;
        Ok((date, ClockDuration::between(entry, exit)))
    }
}

/// Summary of hours worked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeStatistics {
    pub total_hours_this_year: f64,
    pub record_count_this_year: u32,
    pub average_hours_this_year: f64,
    /// Longest single shift, across all years.
    pub longest_shift_hours: f64,
    /// Hours per month of the reference year, January first.
    pub monthly_hours: [f64; MONTHS],
    pub skipped: Vec<SkippedRecord>,
}

impl TimeStatistics {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Summarize pointage records for `reference_year`.
///
/// Records whose date or times fail to parse are skipped and reported.
pub fn summarize_time_records(records: &[TimeRecord], reference_year: i32) -> TimeStatistics {
    let mut skipped = Vec::new();
    let mut total_minutes = 0u32;
    let mut count = 0u32;
    let mut longest = ClockDuration::default();
    let mut monthly_minutes = [0u32; MONTHS];

    for (index, record) in records.iter().enumerate() {
        let (date, worked) = match record.worked() {
            Ok(parsed) => parsed,
            Err(e) => {
                skipped.push(SkippedRecord::new("pointage", index, &e));
                continue;
            }
        };

        longest = longest.max(worked);

        if date.year() == reference_year {
            accumulate(&mut total_minutes, worked.minutes());
            accumulate(&mut count, 1);
            accumulate(&mut monthly_minutes[date.month0() as usize], worked.minutes());
        }
    }

    let average_hours_this_year = if count == 0 {
        0.0
    } else {
        (f64::from(total_minutes) / f64::from(count) / 60.0 * 100.0).round() / 100.0
    };

    debug!(
        records = records.len(),
        skipped = skipped.len(),
        reference_year,
        total_minutes,
        "summarized pointage"
    );

    TimeStatistics {
        total_hours_this_year: minutes_to_hours(total_minutes),
        record_count_this_year: count,
        average_hours_this_year,
        longest_shift_hours: longest.hours(),
        monthly_hours: monthly_minutes.map(minutes_to_hours),
        skipped,
    }
}
