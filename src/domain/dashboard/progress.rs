//! Progress metrics: good days, journaling streak, and mood stability.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use super::round_to;
use crate::domain::emotion::EmotionRecord;

/// How many of the most recent journal entries the streak walk looks at.
pub const STREAK_LOOKBACK_ENTRIES: u32 = 30;

/// Stability reported while fewer than three days have been analyzed.
const INSUFFICIENT_DATA_STABILITY: f64 = 85.0;

const MIN_STABILITY_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoodDays {
    pub count: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalingStreak {
    pub current_days: u32,
    /// Analyzed days inside the dashboard window.
    pub this_period: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityStatus {
    Excellent,
    Good,
    Improving,
}

impl StabilityStatus {
    fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            StabilityStatus::Excellent
        } else if percentage >= 60.0 {
            StabilityStatus::Good
        } else {
            StabilityStatus::Improving
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodStability {
    pub percentage: f64,
    pub status: StabilityStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub good_days: GoodDays,
    pub journaling_streak: JournalingStreak,
    pub mood_stability: MoodStability,
    pub total_entries: u64,
}

/// Assembles the progress group from the window series, the current
/// streak, and the number of journal entries written in the window.
pub fn progress(series: &[EmotionRecord], current_streak: u32, total_entries: u64) -> Progress {
    Progress {
        good_days: good_days(series),
        journaling_streak: JournalingStreak {
            current_days: current_streak,
            this_period: series.len(),
        },
        mood_stability: mood_stability(series),
        total_entries,
    }
}

pub fn good_days(series: &[EmotionRecord]) -> GoodDays {
    let count = series.iter().filter(|r| r.scores.is_good_day()).count();
    let denominator = series.len().max(1);
    GoodDays {
        count,
        total: series.len(),
        percentage: round_to(count as f64 / denominator as f64 * 100.0, 1),
    }
}

/// Counts consecutive calendar days with a journal entry, walking back
/// from `today`. A day without an entry ends the streak, so a streak is
/// zero when nothing was written today.
pub fn current_streak(today: NaiveDate, entry_dates: &[NaiveDate]) -> u32 {
    let dates: BTreeSet<NaiveDate> = entry_dates.iter().copied().collect();
    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

/// `100 * (1 - coefficient of variation)` of the daily positive fraction,
/// clamped to [0, 100].
pub fn mood_stability(series: &[EmotionRecord]) -> MoodStability {
    if series.len() < MIN_STABILITY_POINTS {
        return MoodStability {
            percentage: INSUFFICIENT_DATA_STABILITY,
            status: StabilityStatus::from_percentage(INSUFFICIENT_DATA_STABILITY),
        };
    }

    let fractions: Vec<f64> = series.iter().map(|r| r.scores.positive_fraction()).collect();
    let n = fractions.len() as f64;
    let mean = fractions.iter().sum::<f64>() / n;
    let variance = fractions.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;
    let coefficient_of_variation = if mean == 0.0 {
        0.0
    } else {
        variance.sqrt() / mean
    };

    let percentage = round_to(((1.0 - coefficient_of_variation) * 100.0).clamp(0.0, 100.0), 1);
    MoodStability {
        percentage,
        status: StabilityStatus::from_percentage(percentage),
    }
}
