//! The seven emotions scored for every analyzed journal day.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Emotion tracked by the classifier.
///
/// Declaration order is the canonical enumeration order; arg-max ties are
/// broken by whichever emotion comes first here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Stressed,
    Anxious,
    Angry,
    Sad,
    Agitated,
    Neutral,
}

impl Emotion {
    /// All emotions in enumeration order.
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Stressed,
        Emotion::Anxious,
        Emotion::Angry,
        Emotion::Sad,
        Emotion::Agitated,
        Emotion::Neutral,
    ];

    /// Lowercase key used in storage columns and classifier payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Stressed => "stressed",
            Emotion::Anxious => "anxious",
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
            Emotion::Agitated => "agitated",
            Emotion::Neutral => "neutral",
        }
    }

    /// Returns true for the emotions counted on the positive side of a mood.
    pub fn is_positive(&self) -> bool {
        matches!(self, Emotion::Happy | Emotion::Neutral)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Emotion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::invalid_format("emotion", format!("unknown emotion '{}'", s)))
    }
}
