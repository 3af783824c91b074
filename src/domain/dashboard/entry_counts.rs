use serde::Serialize;

use super::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryCounts {
    pub this_week: u64,
    pub total_period: u64,
    pub average_per_week: f64,
}

/// Journal-entry volume over the trailing week and the whole window.
///
/// The number of weeks in the window never drops below one, so windows
/// shorter than a week report their total as the weekly average.
pub fn entry_counts(this_week: u64, total_period: u64, days: u32) -> EntryCounts {
    let weeks = (f64::from(days) / 7.0).max(1.0);
    EntryCounts {
        this_week,
        total_period,
        average_per_week: round_to(total_period as f64 / weeks, 1),
    }
}
