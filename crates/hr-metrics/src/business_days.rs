//! Business-day counting.
//!
//! A business day is any Monday through Friday; public holidays are not
//! considered. Counting walks the range one calendar day at a time, so cost
//! grows linearly with the span. There is no upper bound on range length and
//! nothing is cached between calls; HR absence periods are short enough that
//! this never matters in practice.

use chrono::{Datelike, NaiveDate};

use crate::range::DateRange;

/// Whether `date` is a Monday through Friday.
///
/// Uses the 0 = Sunday .. 6 = Saturday numbering and excludes both ends.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday().num_days_from_sunday(), 0 | 6)
}

/// Count business days in `range`, both ends included.
///
/// Inverted ranges count zero.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hr_metrics::{count_business_days, DateRange};
///
/// // Friday to Monday: the weekend is skipped.
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
/// );
/// assert_eq!(count_business_days(&range), 2);
/// ```
pub fn count_business_days(range: &DateRange) -> u32 {
    if range.is_inverted() {
        return 0;
    }
    range
        .start
        .iter_days()
        .take_while(|day| *day <= range.end)
        .filter(|day| is_business_day(*day))
        .count() as u32
}

/// Shared entry point for business-day counting.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessDayCounter;

impl BusinessDayCounter {
    pub fn count(&self, range: &DateRange) -> u32 {
        count_business_days(range)
    }
}
