//! Emotional landscape: window-average emotions grouped into display buckets.

use serde::Serialize;

use super::round_to;
use crate::domain::emotion::{Emotion, EmotionRecord};

/// Dominant label used when the window holds no analyzed days.
const EMPTY_WINDOW_DOMINANT: &str = "Neutral";

/// Display bucket shown on the landscape chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandscapeBucket {
    Happy,
    Calm,
    Sad,
    Anxious,
    Angry,
}

impl LandscapeBucket {
    /// Buckets in display order.
    pub const ALL: [LandscapeBucket; 5] = [
        LandscapeBucket::Happy,
        LandscapeBucket::Calm,
        LandscapeBucket::Sad,
        LandscapeBucket::Anxious,
        LandscapeBucket::Angry,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LandscapeBucket::Happy => "Happy",
            LandscapeBucket::Calm => "Calm",
            LandscapeBucket::Sad => "Sad",
            LandscapeBucket::Anxious => "Anxious",
            LandscapeBucket::Angry => "Angry",
        }
    }

    /// Fixed chart color.
    pub fn color(&self) -> &'static str {
        match self {
            LandscapeBucket::Happy => "#fbbf24",
            LandscapeBucket::Calm => "#10b981",
            LandscapeBucket::Sad => "#3b82f6",
            LandscapeBucket::Anxious => "#8b5cf6",
            LandscapeBucket::Angry => "#ef4444",
        }
    }

    /// Emotions whose averages make up this bucket.
    fn emotions(&self) -> &'static [Emotion] {
        match self {
            LandscapeBucket::Happy => &[Emotion::Happy],
            LandscapeBucket::Calm => &[Emotion::Neutral],
            LandscapeBucket::Sad => &[Emotion::Sad],
            LandscapeBucket::Anxious => &[Emotion::Anxious],
            LandscapeBucket::Angry => &[Emotion::Angry, Emotion::Agitated],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandscapeSlice {
    pub name: String,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionalLandscape {
    pub emotions: Vec<LandscapeSlice>,
    pub dominant_emotion: String,
}

impl EmotionalLandscape {
    fn even_split() -> Self {
        let share = 100.0 / LandscapeBucket::ALL.len() as f64;
        Self {
            emotions: LandscapeBucket::ALL
                .iter()
                .map(|b| LandscapeSlice {
                    name: b.name().to_string(),
                    percentage: share,
                    color: b.color().to_string(),
                })
                .collect(),
            dominant_emotion: EMPTY_WINDOW_DOMINANT.to_string(),
        }
    }
}

/// Computes bucket percentages over the window.
///
/// Percentages are relative to the summed bucket values, so they add up to
/// 100 whenever any bucket is non-zero, even when that sum is below 1.
/// Stressed belongs to no bucket and so takes no share: a window of only
/// happy and stressed shows Happy at 100. An all-zero window reports 0 for
/// every bucket; an empty window reports an even split.
pub fn emotional_landscape(series: &[EmotionRecord]) -> EmotionalLandscape {
    if series.is_empty() {
        return EmotionalLandscape::even_split();
    }

    let days = series.len() as f64;
    let average = |emotion: Emotion| -> f64 {
        series
            .iter()
            .map(|r| f64::from(r.scores.get(emotion).value()))
            .sum::<f64>()
            / days
    };

    let values: Vec<(LandscapeBucket, f64)> = LandscapeBucket::ALL
        .iter()
        .map(|bucket| (*bucket, bucket.emotions().iter().map(|e| average(*e)).sum()))
        .collect();

    let total: f64 = values.iter().map(|(_, v)| v).sum();
    let denominator = if total > 0.0 { total } else { 1.0 };

    let mut dominant = values[0];
    for candidate in &values {
        if candidate.1 > dominant.1 {
            dominant = *candidate;
        }
    }

    EmotionalLandscape {
        emotions: values
            .iter()
            .map(|(bucket, value)| LandscapeSlice {
                name: bucket.name().to_string(),
                percentage: round_to(value / denominator * 100.0, 1),
                color: bucket.color().to_string(),
            })
            .collect(),
        dominant_emotion: dominant.0.name().to_string(),
    }
}
