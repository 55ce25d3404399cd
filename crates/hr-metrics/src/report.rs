//! Plumbing shared by the statistics builders.
//!
//! Every aggregator recovers from bad records locally: the record is left
//! out of the totals and a [`SkippedRecord`] is returned alongside the
//! statistics so the caller can warn the user. Nothing is dropped silently.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::MetricsError;

/// Number of monthly buckets in every histogram (January..December).
pub const MONTHS: usize = 12;

/// A record excluded from aggregation because one of its fields failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position of the record in the input slice.
    pub index: usize,
    /// The parse error, as displayed.
    pub reason: String,
}

impl SkippedRecord {
    /// Record and log a skipped input.
    pub(crate) fn new(kind: &'static str, index: usize, error: &MetricsError) -> Self {
        warn!(kind, index, %error, "skipping unparsable record");
        Self {
            index,
            reason: error.to_string(),
        }
    }
}

/// Deserialize a string field, reading JSON `null` as `""`.
///
/// Open absences and unfinished pointages arrive with `null` dates or
/// times. Reading them as empty keeps the rest of the array intact; the
/// record is then skipped and reported by its aggregator.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Add to a running total, saturating at `u32::MAX`.
///
/// Ranges have no upper bound, so totals over very long spans pin at the
/// maximum instead of overflowing.
pub(crate) fn accumulate(total: &mut u32, amount: u32) {
    *total = total.saturating_add(amount);
}
