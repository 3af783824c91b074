//! Emotion score value objects (0-10 scale) and the derived mood scales.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Emotion;
use crate::domain::foundation::ValidationError;

/// Intensity of a single emotion, between 0 and 10 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct EmotionScore(u8);

impl EmotionScore {
    /// Lowest allowed score.
    pub const MIN: u8 = 0;

    /// Highest allowed score.
    pub const MAX: u8 = 10;

    /// Zero intensity.
    pub const ZERO: Self = Self(0);

    /// Creates a score, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        Self::try_new_for("score", value)
    }

    /// Creates a score for a named field, returning error if out of range.
    pub fn try_new_for(field: &str, value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ValidationError::out_of_range(
                field,
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Creates a score, saturating into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    /// Returns the score as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for EmotionScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<EmotionScore> for u8 {
    fn from(score: EmotionScore) -> Self {
        score.0
    }
}

impl fmt::Display for EmotionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven-score emotion vector describing one user's one journal day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    happy: EmotionScore,
    stressed: EmotionScore,
    anxious: EmotionScore,
    angry: EmotionScore,
    sad: EmotionScore,
    agitated: EmotionScore,
    neutral: EmotionScore,
}

impl EmotionScores {
    /// Creates a vector from raw values, rejecting any outside [0, 10].
    pub fn try_new(
        happy: i64,
        stressed: i64,
        anxious: i64,
        angry: i64,
        sad: i64,
        agitated: i64,
        neutral: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            happy: EmotionScore::try_new_for("happy", happy)?,
            stressed: EmotionScore::try_new_for("stressed", stressed)?,
            anxious: EmotionScore::try_new_for("anxious", anxious)?,
            angry: EmotionScore::try_new_for("angry", angry)?,
            sad: EmotionScore::try_new_for("sad", sad)?,
            agitated: EmotionScore::try_new_for("agitated", agitated)?,
            neutral: EmotionScore::try_new_for("neutral", neutral)?,
        })
    }

    /// Builds a vector by asking for each emotion's score.
    pub fn from_fn(mut score: impl FnMut(Emotion) -> EmotionScore) -> Self {
        Self {
            happy: score(Emotion::Happy),
            stressed: score(Emotion::Stressed),
            anxious: score(Emotion::Anxious),
            angry: score(Emotion::Angry),
            sad: score(Emotion::Sad),
            agitated: score(Emotion::Agitated),
            neutral: score(Emotion::Neutral),
        }
    }

    /// The vector stored when classification fails: all zero except neutral = 5.
    pub fn neutral_default() -> Self {
        Self {
            neutral: EmotionScore(5),
            ..Self::default()
        }
    }

    /// Score for one emotion.
    pub fn get(&self, emotion: Emotion) -> EmotionScore {
        match emotion {
            Emotion::Happy => self.happy,
            Emotion::Stressed => self.stressed,
            Emotion::Anxious => self.anxious,
            Emotion::Angry => self.angry,
            Emotion::Sad => self.sad,
            Emotion::Agitated => self.agitated,
            Emotion::Neutral => self.neutral,
        }
    }

    /// Iterates `(emotion, score)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, EmotionScore)> + '_ {
        Emotion::ALL.iter().map(move |e| (*e, self.get(*e)))
    }

    /// `happy + neutral`.
    pub fn positive(&self) -> u32 {
        self.iter()
            .filter(|(e, _)| e.is_positive())
            .map(|(_, s)| u32::from(s.value()))
            .sum()
    }

    /// `sad + anxious + stressed + angry + agitated`.
    pub fn negative(&self) -> u32 {
        self.iter()
            .filter(|(e, _)| !e.is_positive())
            .map(|(_, s)| u32::from(s.value()))
            .sum()
    }

    /// Signed mood score (`positive - negative`) used for trend comparison.
    pub fn mood_score(&self) -> i32 {
        self.positive() as i32 - self.negative() as i32
    }

    /// Share of positive intensity, 0.5 when there is no intensity at all.
    pub fn positive_fraction(&self) -> f64 {
        let total = self.positive() + self.negative();
        if total == 0 {
            return 0.5;
        }
        f64::from(self.positive()) / f64::from(total)
    }

    /// Normalized 1-5 scale for calendar display, 3 when undefined.
    pub fn journey_score(&self) -> f64 {
        let total = self.positive() + self.negative();
        if total == 0 {
            return 3.0;
        }
        f64::from(self.positive()) / f64::from(total) * 5.0
    }

    /// Highest-scoring emotion; ties go to the earliest in enumeration order.
    pub fn dominant(&self) -> Emotion {
        let mut best = (Emotion::Happy, self.happy);
        for (emotion, score) in self.iter() {
            if score > best.1 {
                best = (emotion, score);
            }
        }
        best.0
    }

    /// Returns true when positive intensity exceeds negative intensity.
    pub fn is_good_day(&self) -> bool {
        self.positive() > self.negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scores(values: [i64; 7]) -> EmotionScores {
        EmotionScores::try_new(
            values[0], values[1], values[2], values[3], values[4], values[5], values[6],
        )
        .unwrap()
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert!(EmotionScore::try_new(-1).is_err());
        assert!(EmotionScore::try_new(11).is_err());
        assert!(EmotionScore::try_new(0).is_ok());
        assert!(EmotionScore::try_new(10).is_ok());
    }

    #[test]
    fn score_clamps_into_range() {
        assert_eq!(EmotionScore::clamped(-4).value(), 0);
        assert_eq!(EmotionScore::clamped(42).value(), 10);
        assert_eq!(EmotionScore::clamped(7).value(), 7);
    }

    #[test]
    fn vector_rejection_names_the_field() {
        let err = EmotionScores::try_new(0, 0, 0, 12, 0, 0, 0).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("angry", 0, 10, 12));
    }

    #[test]
    fn deserialization_rejects_out_of_range() {
        let json = r#"{"happy":3,"stressed":0,"anxious":0,"angry":0,"sad":15,"agitated":0,"neutral":0}"#;
        assert!(serde_json::from_str::<EmotionScores>(json).is_err());
    }

    #[test]
    fn neutral_default_is_neutral_five() {
        let d = EmotionScores::neutral_default();
        assert_eq!(d.get(Emotion::Neutral).value(), 5);
        assert_eq!(d.positive(), 5);
        assert_eq!(d.negative(), 0);
    }

    #[test]
    fn positive_and_negative_partition_the_vector() {
        let s = scores([6, 1, 2, 3, 4, 5, 2]);
        assert_eq!(s.positive(), 8);
        assert_eq!(s.negative(), 15);
        assert_eq!(s.mood_score(), -7);
        assert!(!s.is_good_day());
    }

    #[test]
    fn journey_score_defaults_to_three() {
        assert_eq!(EmotionScores::default().journey_score(), 3.0);
        assert_eq!(EmotionScores::default().positive_fraction(), 0.5);
    }

    #[test]
    fn journey_score_scales_positive_share() {
        let s = scores([3, 1, 0, 0, 0, 0, 0]);
        assert!((s.journey_score() - 3.75).abs() < 1e-9);
    }

    #[test]
    fn dominant_breaks_ties_by_enumeration_order() {
        let s = scores([2, 7, 7, 0, 0, 0, 7]);
        assert_eq!(s.dominant(), Emotion::Stressed);
        assert_eq!(EmotionScores::default().dominant(), Emotion::Happy);
    }

    proptest! {
        #[test]
        fn every_field_rejects_values_outside_range(
            field in 0usize..7,
            bad in prop_oneof![-1000i64..0, 11i64..1000],
        ) {
            let mut values = [0i64; 7];
            values[field] = bad;
            let result = EmotionScores::try_new(
                values[0], values[1], values[2], values[3], values[4], values[5], values[6],
            );
            prop_assert!(result.is_err());
        }

        #[test]
        fn in_range_values_are_accepted(values in proptest::array::uniform7(0i64..=10)) {
            let s = EmotionScores::try_new(
                values[0], values[1], values[2], values[3], values[4], values[5], values[6],
            );
            prop_assert!(s.is_ok());
            let s = s.unwrap();
            prop_assert!(s.journey_score() >= 0.0 && s.journey_score() <= 5.0);
        }
    }
}
