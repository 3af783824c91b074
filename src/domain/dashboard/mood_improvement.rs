//! Mood improvement: compares the first and second half of the window.

use serde::Serialize;

use super::round_to;
use crate::domain::emotion::EmotionRecord;

/// Change (in percent) above which the mood counts as improving, and below
/// whose negation it counts as declining.
const TREND_THRESHOLD_PERCENT: f64 = 5.0;

/// Direction of the mood over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    /// Not enough data to compare.
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodImprovement {
    pub percentage: f64,
    pub trend: Trend,
    pub message: String,
    pub days_compared: usize,
}

impl MoodImprovement {
    fn insufficient_data() -> Self {
        Self {
            percentage: 0.0,
            trend: Trend::Neutral,
            message: "Need more data".to_string(),
            days_compared: 0,
        }
    }
}

/// Computes the improvement trend of an ascending series.
///
/// The series is split at `len / 2`; each half's average signed mood score is
/// compared relative to the first half's magnitude.
pub fn mood_improvement(series: &[EmotionRecord]) -> MoodImprovement {
    if series.len() < 2 {
        return MoodImprovement::insufficient_data();
    }

    let (first, second) = series.split_at(series.len() / 2);
    let first_avg = average_mood_score(first);
    let second_avg = average_mood_score(second);

    let change = if first_avg == 0.0 {
        0.0
    } else {
        (second_avg - first_avg) / first_avg.abs() * 100.0
    };

    let trend = if change > TREND_THRESHOLD_PERCENT {
        Trend::Improving
    } else if change < -TREND_THRESHOLD_PERCENT {
        Trend::Declining
    } else {
        Trend::Stable
    };

    let percentage = round_to(change, 1);
    let message = match trend {
        Trend::Improving => format!(
            "Your mood has improved by {:.1}% over this period. Keep it up!",
            percentage
        ),
        Trend::Declining => format!(
            "Your mood has dipped by {:.1}% over this period. Be gentle with yourself.",
            percentage.abs()
        ),
        Trend::Stable | Trend::Neutral => "Your mood has been steady over this period.".to_string(),
    };

    MoodImprovement {
        percentage,
        trend,
        message,
        days_compared: series.len(),
    }
}

fn average_mood_score(records: &[EmotionRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: i64 = records
        .iter()
        .map(|r| i64::from(r.scores.mood_score()))
        .sum();
    total as f64 / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::test_support::{record_on, scores};

    #[test]
    fn fewer_than_two_points_is_neutral() {
        let none = mood_improvement(&[]);
        assert_eq!(none.percentage, 0.0);
        assert_eq!(none.trend, Trend::Neutral);
        assert_eq!(none.message, "Need more data");
        assert_eq!(none.days_compared, 0);

        let one = mood_improvement(&[record_on(1, scores([5, 0, 0, 0, 0, 0, 0]))]);
        assert_eq!(one.trend, Trend::Neutral);
        assert_eq!(one.days_compared, 0);
    }

    #[test]
    fn ten_days_from_minus_four_to_plus_four_is_two_hundred_percent() {
        // mood -4: positive 1, negative 5; mood +4: positive 5, negative 1
        let low = scores([1, 5, 0, 0, 0, 0, 0]);
        let high = scores([5, 1, 0, 0, 0, 0, 0]);
        let series: Vec<_> = (1..=10)
            .map(|d| record_on(d, if d <= 5 { low } else { high }))
            .collect();

        let result = mood_improvement(&series);
        assert_eq!(result.percentage, 200.0);
        assert_eq!(result.trend, Trend::Improving);
        assert_eq!(result.days_compared, 10);
    }

    #[test]
    fn declining_mood_is_reported() {
        let good = scores([8, 0, 0, 0, 0, 0, 2]);
        let bad = scores([2, 3, 3, 0, 0, 0, 2]);
        let series = vec![record_on(1, good), record_on(2, bad)];

        let result = mood_improvement(&series);
        assert_eq!(result.trend, Trend::Declining);
        assert!(result.percentage < -5.0);
        assert!(result.message.contains("dipped"));
    }

    #[test]
    fn small_changes_are_stable() {
        let a = scores([5, 1, 0, 0, 0, 0, 5]); // +9
        let b = scores([5, 1, 0, 0, 0, 0, 5]);
        let result = mood_improvement(&[record_on(1, a), record_on(2, b)]);
        assert_eq!(result.trend, Trend::Stable);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn zero_first_half_average_yields_zero_change() {
        let flat = scores([1, 1, 0, 0, 0, 0, 0]); // mood 0
        let up = scores([9, 0, 0, 0, 0, 0, 0]);
        let result = mood_improvement(&[record_on(1, flat), record_on(2, up)]);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.trend, Trend::Stable);
    }

    #[test]
    fn odd_length_series_puts_extra_day_in_second_half() {
        // first half: [-4]; second half: [-4, +4] -> avg 0 -> +100%
        let low = scores([1, 5, 0, 0, 0, 0, 0]);
        let high = scores([5, 1, 0, 0, 0, 0, 0]);
        let series = vec![record_on(1, low), record_on(2, low), record_on(3, high)];

        let result = mood_improvement(&series);
        assert_eq!(result.percentage, 100.0);
        assert_eq!(result.days_compared, 3);
    }
}
