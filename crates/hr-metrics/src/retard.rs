//! Lateness (retard) statistics.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{ClockDuration, ClockTime};
use crate::error::Result;
use crate::range::parse_date;
use crate::report::{accumulate, null_as_empty, SkippedRecord, MONTHS};

/// A lateness entry as delivered by the REST API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatenessRecord {
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "dateRetard",
        alias = "date_retard"
    )]
    pub date: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "heurePrevue",
        alias = "heure_prevue"
    )]
    pub scheduled: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "heureArrivee",
        alias = "heure_arrivee"
    )]
    pub actual: String,
}

impl LatenessRecord {
    pub fn new(
        date: impl Into<String>,
        scheduled: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            scheduled: scheduled.into(),
            actual: actual.into(),
        }
    }

    /// Parse the record into its calendar date and delay in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MetricsError`] if the date or either time is malformed.
    pub fn delay(&self) -> Result<(NaiveDate, u32)> {
        let date = parse_date(&self.date)?;
        let scheduled = ClockTime::parse(&self.scheduled)?;
        let actual = ClockTime::parse(&self.actual)?;
        Ok((date, ClockDuration::between(scheduled, actual).minutes()))
    }
}

/// Summary of lateness in minutes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LatenessStatistics {
    pub total_minutes_this_year: u32,
    /// Records dated in the reference year, late or not.
    pub record_count_this_year: u32,
    /// Records in the reference year with a positive delay.
    pub late_count_this_year: u32,
    /// Longest single delay, across all years.
    pub longest_minutes: u32,
    pub monthly_minutes: [u32; MONTHS],
    pub skipped: Vec<SkippedRecord>,
}

impl LatenessStatistics {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Summarize lateness records for `reference_year`.
///
/// Records whose date or times fail to parse are skipped and reported.
pub fn summarize_lateness(records: &[LatenessRecord], reference_year: i32) -> LatenessStatistics {
    let mut stats = LatenessStatistics::default();

    for (index, record) in records.iter().enumerate() {
        let (date, minutes) = match record.delay() {
            Ok(parsed) => parsed,
            Err(e) => {
                stats.skipped.push(SkippedRecord::new("retard", index, &e));
                continue;
            }
        };

        stats.longest_minutes = stats.longest_minutes.max(minutes);

        if date.year() == reference_year {
            accumulate(&mut stats.total_minutes_this_year, minutes);
            accumulate(&mut stats.record_count_this_year, 1);
            if minutes > 0 {
                accumulate(&mut stats.late_count_this_year, 1);
            }
            accumulate(&mut stats.monthly_minutes[date.month0() as usize], minutes);
        }
    }

    debug!(
        records = records.len(),
        skipped = stats.skipped.len(),
        reference_year,
        total_minutes = stats.total_minutes_this_year,
        "summarized lateness"
    );

    stats
}
