//! Year-scoped absence statistics for the dashboard.
//!
//! Scoping is deliberately uneven and pinned by tests:
//!
//! | statistic                          | scope                 |
//! |------------------------------------|-----------------------|
//! | `total_business_days_this_year`    | start year == ref     |
//! | `record_count_this_year`           | start year == ref     |
//! | `monthly_histogram`                | start year == ref     |
//! | `longest_record_days`              | all records           |
//! | `category_totals`                  | all records           |
//!
//! A range spanning a month boundary is attributed entirely to its start
//! month.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::business_days::count_business_days;
use crate::error::Result;
use crate::range::DateRange;
use crate::report::{accumulate, null_as_empty, SkippedRecord, MONTHS};

/// An absence as delivered by the REST API, with string-typed dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "dateDebut",
        alias = "date_debut"
    )]
    pub start: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "dateFin",
        alias = "date_fin"
    )]
    pub end: String,
    /// Free-text motif. Empty labels are kept and bucketed under `""`.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        alias = "motif",
        alias = "type"
    )]
    pub category: String,
}

impl AbsenceRecord {
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            category: category.into(),
        }
    }

    /// Parse the record's dates into a [`DateRange`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::MetricsError::InvalidDate`] if either date is malformed.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::parse(&self.start, &self.end)
    }
}

/// Summary statistics over a set of absences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbsenceStatistics {
    pub total_business_days_this_year: u32,
    pub record_count_this_year: u32,
    /// Business days of the longest absence, across all years.
    pub longest_record_days: u32,
    /// Business days per start month of the reference year, January first.
    pub monthly_histogram: [u32; MONTHS],
    /// Business days per category, across all years.
    pub category_totals: BTreeMap<String, u32>,
    /// Records left out because their dates failed to parse.
    pub skipped: Vec<SkippedRecord>,
}

impl AbsenceStatistics {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Aggregate absences into dashboard statistics for `reference_year`.
///
/// Pass the current year explicitly; this function never reads the clock.
/// Records with unparsable dates are skipped and reported in
/// [`AbsenceStatistics::skipped`].
///
/// # Examples
///
/// ```
/// use hr_metrics::{aggregate, AbsenceRecord};
///
/// let records = vec![
///     AbsenceRecord::new("2024-01-03", "2024-01-05", "Maladie"),
///     AbsenceRecord::new("2024-02-30", "2024-03-01", "Congé"),
/// ];
/// let stats = aggregate(&records, 2024);
/// assert_eq!(stats.total_business_days_this_year, 3);
/// assert_eq!(stats.skipped_count(), 1);
/// ```
pub fn aggregate(records: &[AbsenceRecord], reference_year: i32) -> AbsenceStatistics {
    let mut stats = AbsenceStatistics::default();

    for (index, record) in records.iter().enumerate() {
        let range = match record.range() {
            Ok(range) => range,
            Err(e) => {
                stats.skipped.push(SkippedRecord::new("absence", index, &e));
                continue;
            }
        };

        let days = count_business_days(&range);
        stats.longest_record_days = stats.longest_record_days.max(days);

        if range.start_year() == reference_year {
            accumulate(&mut stats.total_business_days_this_year, days);
            accumulate(&mut stats.record_count_this_year, 1);
            accumulate(&mut stats.monthly_histogram[range.start_month_index()], days);
        }

        accumulate(
            stats
                .category_totals
                .entry(record.category.clone())
                .or_insert(0),
            days,
        );
    }

    debug!(
        records = records.len(),
        skipped = stats.skipped.len(),
        reference_year,
        total_days = stats.total_business_days_this_year,
        "aggregated absences"
    );

    stats
}

/// Shared entry point for absence aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsenceAggregator;

impl AbsenceAggregator {
    pub fn aggregate(&self, records: &[AbsenceRecord], reference_year: i32) -> AbsenceStatistics {
        aggregate(records, reference_year)
    }
}
