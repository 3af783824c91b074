//! GetEmotionSummaryHandler - A user's records over an optional date range.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::emotion::EmotionRecord;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::EmotionRepository;

#[derive(Debug, Clone)]
pub struct GetEmotionSummaryQuery {
    pub user_id: UserId,
    /// Inclusive lower bound; open when `None`.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound; open when `None`.
    pub end_date: Option<NaiveDate>,
}

/// Records in ascending date order.
pub type GetEmotionSummaryResult = Vec<EmotionRecord>;

pub struct GetEmotionSummaryHandler {
    emotions: Arc<dyn EmotionRepository>,
}

impl GetEmotionSummaryHandler {
    pub fn new(emotions: Arc<dyn EmotionRepository>) -> Self {
        Self { emotions }
    }

    pub async fn handle(
        &self,
        query: GetEmotionSummaryQuery,
    ) -> Result<GetEmotionSummaryResult, DomainError> {
        match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => {
                self.emotions.find_in_range(&query.user_id, start, end).await
            }
            (start, end) => {
                // find_by_user is newest first
                let mut records = self.emotions.find_by_user(&query.user_id).await?;
                records.retain(|r| {
                    start.map_or(true, |s| r.journal_date >= s)
                        && end.map_or(true, |e| r.journal_date <= e)
                });
                records.reverse();
                Ok(records)
            }
        }
    }
}
