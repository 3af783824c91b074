//! In-memory implementation of the journal and emotion storage ports.
//!
//! Journal entries get ascending ids in insertion order, mirroring the
//! database sequence. Save and lookup failures can be injected to exercise
//! the "persistence failed" paths of the analysis engine.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::domain::emotion::{EmotionRecord, JournalEntry};
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, UserId};
use crate::ports::{EmotionFilter, EmotionRepository, JournalReader, SaveOutcome};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<Vec<JournalEntry>>,
    emotions: RwLock<Vec<EmotionRecord>>,
    fail_saves: AtomicBool,
    failing_lookups: RwLock<BTreeSet<UserId>>,
}

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::new(ErrorCode::InternalError, "in-memory store lock poisoned")
}

fn newest_first(records: &mut [EmotionRecord]) {
    records.sort_by(|a, b| b.journal_date.cmp(&a.journal_date));
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Appends a journal entry and returns its id.
    pub fn add_entry(
        &self,
        user_id: &UserId,
        journal_date: NaiveDate,
        entry_text: impl Into<String>,
        ai_response: Option<&str>,
    ) -> Result<EntryId, DomainError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let entry_id = EntryId::new(entries.len() as i64 + 1);
        entries.push(JournalEntry {
            entry_id,
            user_id: user_id.clone(),
            journal_date,
            entry_text: entry_text.into(),
            ai_response: ai_response.map(str::to_string),
        });
        Ok(entry_id)
    }

    /// Stores records as-is, bypassing the uniqueness check.
    pub fn seed_emotions(&self, records: impl IntoIterator<Item = EmotionRecord>) -> Result<(), DomainError> {
        self.emotions.write().map_err(poisoned)?.extend(records);
        Ok(())
    }

    /// Makes every subsequent `save` fail with a database error.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Makes `exists_for_day` fail with a database error for one user.
    pub fn fail_lookups_for(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.failing_lookups
            .write()
            .map_err(poisoned)?
            .insert(user_id.clone());
        Ok(())
    }

    /// Number of stored emotion records.
    pub fn emotion_count(&self) -> usize {
        self.emotions
            .read()
            .map(|records| records.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl EmotionRepository for InMemoryStore {
    async fn exists_for_day(&self, user_id: &UserId, date: NaiveDate) -> Result<bool, DomainError> {
        if self.failing_lookups.read().map_err(poisoned)?.contains(user_id) {
            return Err(DomainError::database("injected lookup failure"));
        }
        let emotions = self.emotions.read().map_err(poisoned)?;
        Ok(emotions.iter().any(|r| r.key() == (user_id, date)))
    }

    async fn save(&self, record: &EmotionRecord) -> Result<SaveOutcome, DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::database("injected save failure"));
        }

        let mut emotions = self.emotions.write().map_err(poisoned)?;
        if emotions.iter().any(|r| r.key() == record.key()) {
            return Ok(SaveOutcome::AlreadyExists);
        }
        emotions.push(record.clone());
        Ok(SaveOutcome::Inserted)
    }

    async fn find_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<EmotionRecord>, DomainError> {
        let emotions = self.emotions.read().map_err(poisoned)?;
        Ok(emotions.iter().find(|r| r.key() == (user_id, date)).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<EmotionRecord>, DomainError> {
        self.list(&EmotionFilter::default().for_user(user_id.clone()))
            .await
    }

    async fn find_by_entry(&self, entry_id: EntryId) -> Result<Option<EmotionRecord>, DomainError> {
        let emotions = self.emotions.read().map_err(poisoned)?;
        Ok(emotions.iter().find(|r| r.entry_id == entry_id).cloned())
    }

    async fn find_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmotionRecord>, DomainError> {
        let emotions = self.emotions.read().map_err(poisoned)?;
        let mut records: Vec<EmotionRecord> = emotions
            .iter()
            .filter(|r| r.user_id == *user_id && r.journal_date >= start && r.journal_date <= end)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.journal_date);
        Ok(records)
    }

    async fn list(&self, filter: &EmotionFilter) -> Result<Vec<EmotionRecord>, DomainError> {
        let emotions = self.emotions.read().map_err(poisoned)?;
        let mut records: Vec<EmotionRecord> =
            emotions.iter().filter(|r| filter.matches(r)).cloned().collect();
        newest_first(&mut records);
        Ok(records)
    }
}

#[async_trait]
impl JournalReader for InMemoryStore {
    async fn entries_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, DomainError> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut day: Vec<JournalEntry> = entries
            .iter()
            .filter(|e| e.user_id == *user_id && e.journal_date == date)
            .cloned()
            .collect();
        day.sort_by_key(|e| e.entry_id);
        Ok(day)
    }

    async fn latest_entry_id(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<EntryId>, DomainError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == *user_id && e.journal_date == date)
            .map(|e| e.entry_id)
            .max())
    }

    async fn active_users_on(&self, date: NaiveDate) -> Result<Vec<UserId>, DomainError> {
        let entries = self.entries.read().map_err(poisoned)?;
        let users: BTreeSet<UserId> = entries
            .iter()
            .filter(|e| e.journal_date == date)
            .map(|e| e.user_id.clone())
            .collect();
        Ok(users.into_iter().collect())
    }

    async fn recent_entry_dates(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut mine: Vec<&JournalEntry> =
            entries.iter().filter(|e| e.user_id == *user_id).collect();
        mine.sort_by(|a, b| {
            b.journal_date
                .cmp(&a.journal_date)
                .then(b.entry_id.cmp(&a.entry_id))
        });
        Ok(mine
            .into_iter()
            .take(limit as usize)
            .map(|e| e.journal_date)
            .collect())
    }

    async fn count_entries(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, DomainError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == *user_id && e.journal_date >= start && e.journal_date <= end)
            .count() as u64)
    }
}
