//! Emotion record repository port.
//!
//! Stores one emotion vector per (user, journal day). Records are written
//! once by the analysis engine and never updated in place.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::emotion::EmotionRecord;
use crate::domain::foundation::{DomainError, EntryId, UserId};

/// Result of an insert-if-absent write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record was stored.
    Inserted,
    /// A record for the same (user, day) was already present; nothing changed.
    AlreadyExists,
}

/// Optional equality filters for listing records. `None` means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmotionFilter {
    pub user_id: Option<UserId>,
    pub journal_date: Option<NaiveDate>,
}

impl EmotionFilter {
    pub fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.journal_date = Some(date);
        self
    }

    /// Returns true if the record passes every set filter.
    pub fn matches(&self, record: &EmotionRecord) -> bool {
        self.user_id.as_ref().map_or(true, |u| *u == record.user_id)
            && self.journal_date.map_or(true, |d| d == record.journal_date)
    }
}

/// Repository port for emotion records.
///
/// Implementations must enforce uniqueness of (user_id, journal_date):
/// a second `save` for the same key returns `SaveOutcome::AlreadyExists`
/// and leaves the stored record untouched.
#[async_trait]
pub trait EmotionRepository: Send + Sync {
    /// Check whether a record exists for the user and day.
    async fn exists_for_day(&self, user_id: &UserId, date: NaiveDate) -> Result<bool, DomainError>;

    /// Insert a record unless one already exists for its (user, day).
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, record: &EmotionRecord) -> Result<SaveOutcome, DomainError>;

    /// Find the record for a user and day.
    async fn find_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<EmotionRecord>, DomainError>;

    /// All records of a user, newest journal date first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<EmotionRecord>, DomainError>;

    /// The record anchored on a journal entry, if any.
    async fn find_by_entry(&self, entry_id: EntryId) -> Result<Option<EmotionRecord>, DomainError>;

    /// Records of a user with `start <= journal_date <= end`, oldest first.
    async fn find_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmotionRecord>, DomainError>;

    /// Records matching the filter, newest journal date first.
    async fn list(&self, filter: &EmotionFilter) -> Result<Vec<EmotionRecord>, DomainError>;
}
