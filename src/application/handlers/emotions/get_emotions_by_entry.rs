//! GetEmotionsByEntryHandler - The record anchored on a journal entry.

use std::sync::Arc;

use crate::domain::emotion::EmotionRecord;
use crate::domain::foundation::{DomainError, EntryId, ErrorCode};
use crate::ports::EmotionRepository;

#[derive(Debug, Clone)]
pub struct GetEmotionsByEntryQuery {
    pub entry_id: EntryId,
}

pub type GetEmotionsByEntryResult = EmotionRecord;

pub struct GetEmotionsByEntryHandler {
    emotions: Arc<dyn EmotionRepository>,
}

impl GetEmotionsByEntryHandler {
    pub fn new(emotions: Arc<dyn EmotionRepository>) -> Self {
        Self { emotions }
    }

    /// Only the latest entry of an analyzed day anchors a record; any other
    /// entry id yields `NotFound`.
    pub async fn handle(
        &self,
        query: GetEmotionsByEntryQuery,
    ) -> Result<GetEmotionsByEntryResult, DomainError> {
        self.emotions
            .find_by_entry(query.entry_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::NotFound, "No emotion analysis for this entry")
                    .with_detail("entry_id", query.entry_id.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::emotion::EmotionScores;
    use crate::domain::foundation::UserId;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn finds_anchored_record_or_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let record = EmotionRecord::new(
            UserId::new("alice").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            EntryId::new(7),
            EmotionScores::neutral_default(),
        );
        store.seed_emotions([record.clone()]).unwrap();
        let handler = GetEmotionsByEntryHandler::new(store);

        let found = handler
            .handle(GetEmotionsByEntryQuery { entry_id: EntryId::new(7) })
            .await
            .unwrap();
        assert_eq!(found, record);

        let err = handler
            .handle(GetEmotionsByEntryQuery { entry_id: EntryId::new(6) })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
