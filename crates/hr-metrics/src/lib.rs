//! # hr-metrics
//!
//! Deterministic calendar arithmetic for HR records.
//!
//! Absence, pointage and lateness pages all need the same few computations:
//! business days between two dates, hours between two clock times, and
//! year-scoped statistics over a list of records. This crate holds the one
//! shared, tested copy. Every function is pure: the caller supplies the
//! reference year instead of the crate reading the system clock.
//!
//! ## Modules
//!
//! - [`range`] — `DateRange` and defensive parsing of API date strings
//! - [`business_days`] — Monday–Friday counting over an inclusive range
//! - [`clock`] — `"HH:MM"` parsing, same-day durations, lateness minutes
//! - [`absence`] — absence statistics (totals, monthly histogram, per-category)
//! - [`pointage`] — hours-worked statistics
//! - [`retard`] — lateness statistics
//! - [`report`] — skipped-record reporting shared by the aggregators
//! - [`error`] — Error types

pub mod absence;
pub mod business_days;
pub mod clock;
pub mod error;
pub mod pointage;
pub mod range;
pub mod report;
pub mod retard;

pub use absence::{aggregate, AbsenceAggregator, AbsenceRecord, AbsenceStatistics};
pub use business_days::{count_business_days, is_business_day, BusinessDayCounter};
pub use clock::{hours_between, minutes_late, ClockDuration, ClockTime};
pub use error::{MetricsError, Result};
pub use pointage::{summarize_time_records, TimeRecord, TimeStatistics};
pub use range::{parse_date, DateRange};
pub use report::{SkippedRecord, MONTHS};
pub use retard::{summarize_lateness, LatenessRecord, LatenessStatistics};
