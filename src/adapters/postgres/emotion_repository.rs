//! PostgreSQL implementation of EmotionRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::{db_error, parse_user_id};
use crate::domain::emotion::{Emotion, EmotionRecord, EmotionScores};
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, UserId};
use crate::ports::{EmotionFilter, EmotionRepository, SaveOutcome};

const SELECT_EMOTIONS: &str = r#"
    SELECT user_id, journal_date, entry_id,
           happy, stressed, anxious, angry, sad, agitated, neutral
    FROM emotions
"#;

/// PostgreSQL implementation of the EmotionRepository port.
///
/// Uniqueness of (user_id, journal_date) is enforced by the
/// `emotions_user_day_key` constraint; `save` relies on it.
pub struct PostgresEmotionRepository {
    pool: PgPool,
}

impl PostgresEmotionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an emotion record.
#[derive(Debug, sqlx::FromRow)]
struct EmotionRow {
    user_id: String,
    journal_date: NaiveDate,
    entry_id: i64,
    happy: i16,
    stressed: i16,
    anxious: i16,
    angry: i16,
    sad: i16,
    agitated: i16,
    neutral: i16,
}

impl TryFrom<EmotionRow> for EmotionRecord {
    type Error = DomainError;

    fn try_from(row: EmotionRow) -> Result<Self, Self::Error> {
        let scores = EmotionScores::try_new(
            i64::from(row.happy),
            i64::from(row.stressed),
            i64::from(row.anxious),
            i64::from(row.angry),
            i64::from(row.sad),
            i64::from(row.agitated),
            i64::from(row.neutral),
        )
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored score: {}", e))
        })?;

        Ok(EmotionRecord::new(
            parse_user_id(row.user_id)?,
            row.journal_date,
            EntryId::new(row.entry_id),
            scores,
        ))
    }
}

fn into_records(rows: Vec<EmotionRow>) -> Result<Vec<EmotionRecord>, DomainError> {
    rows.into_iter().map(EmotionRecord::try_from).collect()
}

fn score(record: &EmotionRecord, emotion: Emotion) -> i16 {
    i16::from(record.scores.get(emotion).value())
}

#[async_trait]
impl EmotionRepository for PostgresEmotionRepository {
    async fn exists_for_day(&self, user_id: &UserId, date: NaiveDate) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM emotions WHERE user_id = $1 AND journal_date = $2)",
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("check emotion record"))
    }

    async fn save(&self, record: &EmotionRecord) -> Result<SaveOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO emotions (
                user_id, journal_date, entry_id,
                happy, stressed, anxious, angry, sad, agitated, neutral
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id, journal_date) DO NOTHING
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.journal_date)
        .bind(record.entry_id.value())
        .bind(score(record, Emotion::Happy))
        .bind(score(record, Emotion::Stressed))
        .bind(score(record, Emotion::Anxious))
        .bind(score(record, Emotion::Angry))
        .bind(score(record, Emotion::Sad))
        .bind(score(record, Emotion::Agitated))
        .bind(score(record, Emotion::Neutral))
        .execute(&self.pool)
        .await
        .map_err(db_error("save emotion record"))?;

        Ok(if result.rows_affected() == 0 {
            SaveOutcome::AlreadyExists
        } else {
            SaveOutcome::Inserted
        })
    }

    async fn find_for_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<EmotionRecord>, DomainError> {
        let row: Option<EmotionRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND journal_date = $2",
            SELECT_EMOTIONS
        ))
        .bind(user_id.as_str())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find emotion record"))?;

        row.map(EmotionRecord::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<EmotionRecord>, DomainError> {
        let rows: Vec<EmotionRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY journal_date DESC",
            SELECT_EMOTIONS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list emotion records"))?;

        into_records(rows)
    }

    async fn find_by_entry(&self, entry_id: EntryId) -> Result<Option<EmotionRecord>, DomainError> {
        let row: Option<EmotionRow> = sqlx::query_as(&format!(
            "{} WHERE entry_id = $1 LIMIT 1",
            SELECT_EMOTIONS
        ))
        .bind(entry_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("find emotion record by entry"))?;

        row.map(EmotionRecord::try_from).transpose()
    }

    async fn find_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmotionRecord>, DomainError> {
        let rows: Vec<EmotionRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND journal_date BETWEEN $2 AND $3 ORDER BY journal_date ASC",
            SELECT_EMOTIONS
        ))
        .bind(user_id.as_str())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("load emotion range"))?;

        into_records(rows)
    }

    async fn list(&self, filter: &EmotionFilter) -> Result<Vec<EmotionRecord>, DomainError> {
        let rows: Vec<EmotionRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE ($1::TEXT IS NULL OR user_id = $1)
              AND ($2::DATE IS NULL OR journal_date = $2)
            ORDER BY journal_date DESC, user_id
            "#,
            SELECT_EMOTIONS
        ))
        .bind(filter.user_id.as_ref().map(UserId::as_str))
        .bind(filter.journal_date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list emotion records"))?;

        into_records(rows)
    }
}
