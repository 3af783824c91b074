//! PostgreSQL adapters.
//!
//! Schema lives in `migrations/` and is applied at startup when
//! `database.run_migrations` is set.

mod emotion_repository;
mod journal_reader;

pub use emotion_repository::PostgresEmotionRepository;
pub use journal_reader::PostgresJournalReader;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

fn db_error(action: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

fn parse_user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
    })
}
