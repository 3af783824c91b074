//! Dashboard aggregation over a user's emotion series.
//!
//! Every function here is pure: it takes the records of one window and
//! returns a serializable view. Sparse or empty windows produce
//! default-shaped values instead of errors so the dashboard always renders.

mod emotional_landscape;
mod entry_counts;
mod mood_improvement;
mod mood_journey;
pub mod overview;
mod period;
mod progress;

pub use emotional_landscape::{
    emotional_landscape, EmotionalLandscape, LandscapeBucket, LandscapeSlice,
};
pub use entry_counts::{entry_counts, EntryCounts};
pub use mood_improvement::{mood_improvement, MoodImprovement, Trend};
pub use mood_journey::{mood_journey, DailyMood, JourneyStatistics, MoodJourney};
pub use overview::{EmotionDashboard, JournalActivity};
pub use period::{DashboardPeriod, MAX_DASHBOARD_DAYS};
pub use progress::{
    current_streak, good_days, mood_stability, progress, GoodDays, JournalingStreak,
    MoodStability, Progress, StabilityStatus, STREAK_LOOKBACK_ENTRIES,
};

/// Rounds for display; comparisons always use unrounded values.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::domain::emotion::{EmotionRecord, EmotionScores};
    use crate::domain::foundation::{EntryId, UserId};

    pub fn scores(v: [i64; 7]) -> EmotionScores {
        EmotionScores::try_new(v[0], v[1], v[2], v[3], v[4], v[5], v[6]).unwrap()
    }

    /// Record for January `day`, 2024.
    pub fn record_on(day: u32, scores: EmotionScores) -> EmotionRecord {
        EmotionRecord::new(
            UserId::new("test-user").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            EntryId::new(i64::from(day)),
            scores,
        )
    }
}
