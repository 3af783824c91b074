//! ListEmotionsHandler - Query handler for stored emotion records.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::emotion::EmotionRecord;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{EmotionFilter, EmotionRepository};

/// Optional filters; with neither set every record is returned.
#[derive(Debug, Clone, Default)]
pub struct ListEmotionsQuery {
    pub user_id: Option<UserId>,
    pub journal_date: Option<NaiveDate>,
}

/// Records newest first.
pub type ListEmotionsResult = Vec<EmotionRecord>;

pub struct ListEmotionsHandler {
    emotions: Arc<dyn EmotionRepository>,
}

impl ListEmotionsHandler {
    pub fn new(emotions: Arc<dyn EmotionRepository>) -> Self {
        Self { emotions }
    }

    pub async fn handle(&self, query: ListEmotionsQuery) -> Result<ListEmotionsResult, DomainError> {
        let filter = EmotionFilter {
            user_id: query.user_id,
            journal_date: query.journal_date,
        };
        self.emotions.list(&filter).await
    }
}
