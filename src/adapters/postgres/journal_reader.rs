//! PostgreSQL implementation of JournalReader over the `journal_entry` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::{db_error, parse_user_id};
use crate::domain::emotion::JournalEntry;
use crate::domain::foundation::{DomainError, EntryId, UserId};
use crate::ports::JournalReader;

pub struct PostgresJournalReader {
    pool: PgPool,
}

impl PostgresJournalReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct JournalEntryRow {
    entry_id: i64,
    user_id: String,
    journal_date: NaiveDate,
    entry_text: String,
    ai_response: Option<String>,
}

impl TryFrom<JournalEntryRow> for JournalEntry {
    type Error = DomainError;

    fn try_from(row: JournalEntryRow) -> Result<Self, Self::Error> {
        Ok(JournalEntry {
            entry_id: EntryId::new(row.entry_id),
            user_id: parse_user_id(row.user_id)?,
            journal_date: row.journal_date,
            entry_text: row.entry_text,
            ai_response: row.ai_response,
        })
    }
}

#[async_trait]
impl JournalReader for PostgresJournalReader {
    async fn entries_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Vec<JournalEntry>, DomainError> {
        let rows: Vec<JournalEntryRow> = sqlx::query_as(
            r#"
            SELECT entry_id, user_id, journal_date, entry_text, ai_response
            FROM journal_entry
            WHERE user_id = $1 AND journal_date = $2
            ORDER BY entry_id ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load journal entries"))?;

        rows.into_iter().map(JournalEntry::try_from).collect()
    }

    async fn latest_entry_id(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<EntryId>, DomainError> {
        let latest: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(entry_id) FROM journal_entry WHERE user_id = $1 AND journal_date = $2",
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("find latest journal entry"))?;

        Ok(latest.map(EntryId::new))
    }

    async fn active_users_on(&self, date: NaiveDate) -> Result<Vec<UserId>, DomainError> {
        let users: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT user_id FROM journal_entry WHERE journal_date = $1 ORDER BY user_id",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list active users"))?;

        users.into_iter().map(parse_user_id).collect()
    }

    async fn recent_entry_dates(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT journal_date
            FROM journal_entry
            WHERE user_id = $1
            ORDER BY journal_date DESC, entry_id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load recent journal dates"))
    }

    async fn count_entries(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM journal_entry
            WHERE user_id = $1 AND journal_date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id.as_str())
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("count journal entries"))?;

        Ok(count.max(0) as u64)
    }
}
