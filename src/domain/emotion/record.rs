//! Stored emotion analysis for one user and one journal day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::EmotionScores;
use crate::domain::foundation::{EntryId, UserId};

/// One emotion vector per (user, journal day).
///
/// `entry_id` anchors the record on the most recent journal entry of the
/// day; lookups by entry id rely on that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub user_id: UserId,
    pub journal_date: NaiveDate,
    pub entry_id: EntryId,
    #[serde(flatten)]
    pub scores: EmotionScores,
}

impl EmotionRecord {
    /// Creates a new record.
    pub fn new(
        user_id: UserId,
        journal_date: NaiveDate,
        entry_id: EntryId,
        scores: EmotionScores,
    ) -> Self {
        Self {
            user_id,
            journal_date,
            entry_id,
            scores,
        }
    }

    /// Natural key of the record.
    pub fn key(&self) -> (&UserId, NaiveDate) {
        (&self.user_id, self.journal_date)
    }
}
