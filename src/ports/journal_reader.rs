//! Read-only access to journal entries.
//!
//! Entries are written by the journaling surface of the product; this
//! crate only reads them to decide who needs analysis and what to classify.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::emotion::JournalEntry;
use crate::domain::foundation::{DomainError, EntryId, UserId};

#[async_trait]
pub trait JournalReader: Send + Sync {
    /// Entries of a user on one day, ascending by entry id.
    async fn entries_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, DomainError>;

    /// Highest entry id of a user on one day.
    async fn latest_entry_id(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<EntryId>, DomainError>;

    /// Distinct users with at least one entry on the day.
    async fn active_users_on(&self, date: NaiveDate) -> Result<Vec<UserId>, DomainError>;

    /// Journal dates of the user's `limit` most recent entries, newest first.
    ///
    /// Dates repeat when a day has several entries.
    async fn recent_entry_dates(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<NaiveDate>, DomainError>;

    /// Number of entries with `start <= journal_date <= end`.
    async fn count_entries(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, DomainError>;
}
