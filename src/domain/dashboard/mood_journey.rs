//! Day-by-day mood on the 1-5 journey scale.

use chrono::NaiveDate;
use serde::Serialize;

use super::round_to;
use crate::domain::emotion::{Emotion, EmotionRecord, EmotionScores};

/// Journey score reported when the window holds no analyzed days.
const DEFAULT_JOURNEY_SCORE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMood {
    pub date: NaiveDate,
    pub mood_score: f64,
    pub dominant_emotion: Emotion,
    pub emotions: EmotionScores,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyStatistics {
    pub average_mood: f64,
    pub lowest_mood: f64,
    pub highest_mood: f64,
    pub total_days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodJourney {
    pub daily_moods: Vec<DailyMood>,
    pub statistics: JourneyStatistics,
}

pub fn mood_journey(series: &[EmotionRecord]) -> MoodJourney {
    let daily_moods: Vec<DailyMood> = series
        .iter()
        .map(|record| DailyMood {
            date: record.journal_date,
            mood_score: round_to(record.scores.journey_score(), 2),
            dominant_emotion: record.scores.dominant(),
            emotions: record.scores,
        })
        .collect();

    let raw: Vec<f64> = series.iter().map(|r| r.scores.journey_score()).collect();
    let statistics = if raw.is_empty() {
        JourneyStatistics {
            average_mood: DEFAULT_JOURNEY_SCORE,
            lowest_mood: DEFAULT_JOURNEY_SCORE,
            highest_mood: DEFAULT_JOURNEY_SCORE,
            total_days: 0,
        }
    } else {
        let average = raw.iter().sum::<f64>() / raw.len() as f64;
        let lowest = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let highest = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        JourneyStatistics {
            average_mood: round_to(average, 2),
            lowest_mood: round_to(lowest, 2),
            highest_mood: round_to(highest, 2),
            total_days: raw.len(),
        }
    };

    MoodJourney {
        daily_moods,
        statistics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::test_support::{record_on, scores};

    #[test]
    fn empty_window_defaults_to_three() {
        let journey = mood_journey(&[]);
        assert!(journey.daily_moods.is_empty());
        assert_eq!(journey.statistics.average_mood, 3.0);
        assert_eq!(journey.statistics.lowest_mood, 3.0);
        assert_eq!(journey.statistics.highest_mood, 3.0);
        assert_eq!(journey.statistics.total_days, 0);
    }

    #[test]
    fn per_day_scores_and_dominant_emotions() {
        let series = vec![
            record_on(1, scores([10, 0, 0, 0, 0, 0, 0])), // 5.0, happy
            record_on(2, scores([0, 0, 0, 0, 10, 0, 0])),  // 0.0, sad
            record_on(3, scores([2, 0, 0, 0, 0, 0, 2])),   // 5.0, happy (tie -> first)
        ];

        let journey = mood_journey(&series);
        assert_eq!(journey.daily_moods.len(), 3);
        assert_eq!(journey.daily_moods[0].mood_score, 5.0);
        assert_eq!(journey.daily_moods[1].mood_score, 0.0);
        assert_eq!(journey.daily_moods[1].dominant_emotion, Emotion::Sad);
        assert_eq!(journey.daily_moods[2].dominant_emotion, Emotion::Happy);

        assert_eq!(journey.statistics.lowest_mood, 0.0);
        assert_eq!(journey.statistics.highest_mood, 5.0);
        assert_eq!(journey.statistics.average_mood, 3.33);
        assert_eq!(journey.statistics.total_days, 3);
    }

    #[test]
    fn all_zero_day_scores_three() {
        let journey = mood_journey(&[record_on(1, EmotionScores::default())]);
        assert_eq!(journey.daily_moods[0].mood_score, 3.0);
    }

    #[test]
    fn serializes_raw_vector_per_day() {
        let journey = mood_journey(&[record_on(4, scores([1, 2, 3, 4, 5, 6, 7]))]);
        let json = serde_json::to_value(&journey).unwrap();
        assert_eq!(json["daily_moods"][0]["emotions"]["agitated"], 6);
        assert_eq!(json["daily_moods"][0]["dominant_emotion"], "neutral");
    }
}
