use chrono::NaiveDate;
use serde::Serialize;

use super::{
    current_streak, emotional_landscape, entry_counts, mood_improvement, mood_journey, progress,
    DashboardPeriod, EmotionalLandscape, EntryCounts, MoodImprovement, MoodJourney, Progress,
};
use crate::domain::emotion::EmotionRecord;

/// Journal activity the dashboard needs besides the emotion series.
#[derive(Debug, Clone, Default)]
pub struct JournalActivity {
    /// Dates of the most recent journal entries (any order, duplicates allowed).
    pub recent_entry_dates: Vec<NaiveDate>,
    /// Entries written in the trailing seven days.
    pub entries_this_week: u64,
    /// Entries written anywhere in the window.
    pub entries_in_period: u64,
}

/// Everything the emotion dashboard renders, recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionDashboard {
    pub mood_improvement: MoodImprovement,
    pub mood_journey: MoodJourney,
    pub emotional_landscape: EmotionalLandscape,
    pub progress: Progress,
    pub journal_entries: EntryCounts,
    pub period: DashboardPeriod,
}

impl EmotionDashboard {
    /// Computes all five metric groups.
    ///
    /// Records outside the period are ignored and the rest are ordered by
    /// date, so callers may pass an unsorted or wider series.
    pub fn compute(
        period: DashboardPeriod,
        series: &[EmotionRecord],
        activity: &JournalActivity,
    ) -> Self {
        let mut window: Vec<EmotionRecord> = series
            .iter()
            .filter(|r| period.contains(r.journal_date))
            .cloned()
            .collect();
        window.sort_by_key(|r| r.journal_date);

        let streak = current_streak(period.end_date, &activity.recent_entry_dates);

        Self {
            mood_improvement: mood_improvement(&window),
            mood_journey: mood_journey(&window),
            emotional_landscape: emotional_landscape(&window),
            progress: progress(&window, streak, activity.entries_in_period),
            journal_entries: entry_counts(
                activity.entries_this_week,
                activity.entries_in_period,
                period.days,
            ),
            period,
        }
    }
}

#[cfg(test)]
#[path = "overview_test.rs"]
mod overview_test;
