//! AnalyzeUserDayHandler - Command handler producing one day's emotion record.
//!
//! The unit of work shared by the daily run, the catch-up sweep and manual
//! triggers:
//! 1. Skip if the (user, day) already has a record
//! 2. Load the day's entries and build the conversation transcript
//! 3. Classify through the failure-absorbing [`ClassifierAdapter`]
//! 4. Anchor the record on the day's most recent entry and insert it
//!
//! Every failure is reported through the outcome rather than an error, so
//! batch callers can keep going.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::application::ClassifierAdapter;
use crate::domain::emotion::{conversation_transcript, EmotionRecord};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{EmotionRepository, JournalReader, SaveOutcome};

/// Command to analyze a single user's journal day.
#[derive(Debug, Clone)]
pub struct AnalyzeUserDayCommand {
    pub user_id: UserId,
    pub date: NaiveDate,
}

impl AnalyzeUserDayCommand {
    pub fn new(user_id: UserId, date: NaiveDate) -> Self {
        Self { user_id, date }
    }
}

/// What happened to one (user, day).
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// A new record was stored.
    Analyzed {
        record: EmotionRecord,
        /// The classifier failed and the default vector was stored.
        defaulted: bool,
    },
    /// A record already existed, either before we started or because a
    /// concurrent run inserted it first.
    AlreadyAnalyzed,
    /// The user wrote nothing that day.
    NoEntries,
    /// Reading or writing storage failed; nothing was stored.
    StorageFailed(DomainError),
}

impl AnalysisOutcome {
    /// True when the day ends up with a stored record.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            AnalysisOutcome::Analyzed { .. } | AnalysisOutcome::AlreadyAnalyzed
        )
    }

    /// True only when this invocation inserted the record.
    pub fn is_newly_analyzed(&self) -> bool {
        matches!(self, AnalysisOutcome::Analyzed { .. })
    }
}

pub type AnalyzeUserDayResult = AnalysisOutcome;

pub struct AnalyzeUserDayHandler {
    emotions: Arc<dyn EmotionRepository>,
    journal: Arc<dyn JournalReader>,
    classifier: Arc<ClassifierAdapter>,
}

impl AnalyzeUserDayHandler {
    pub fn new(
        emotions: Arc<dyn EmotionRepository>,
        journal: Arc<dyn JournalReader>,
        classifier: Arc<ClassifierAdapter>,
    ) -> Self {
        Self {
            emotions,
            journal,
            classifier,
        }
    }

    pub async fn handle(&self, cmd: AnalyzeUserDayCommand) -> AnalyzeUserDayResult {
        match self.analyze(&cmd).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    user_id = %cmd.user_id,
                    date = %cmd.date,
                    error = %err,
                    "Emotion analysis failed on storage access"
                );
                AnalysisOutcome::StorageFailed(err)
            }
        }
    }

    async fn analyze(&self, cmd: &AnalyzeUserDayCommand) -> Result<AnalysisOutcome, DomainError> {
        if self.emotions.exists_for_day(&cmd.user_id, cmd.date).await? {
            debug!(user_id = %cmd.user_id, date = %cmd.date, "Day already analyzed");
            return Ok(AnalysisOutcome::AlreadyAnalyzed);
        }

        let entries = self.journal.entries_for_day(&cmd.user_id, cmd.date).await?;
        let Some(last_loaded) = entries.last() else {
            debug!(user_id = %cmd.user_id, date = %cmd.date, "No journal entries to analyze");
            return Ok(AnalysisOutcome::NoEntries);
        };

        let transcript = conversation_transcript(&entries);
        let classification = self.classifier.classify(&transcript).await;

        let entry_id = self
            .journal
            .latest_entry_id(&cmd.user_id, cmd.date)
            .await?
            .unwrap_or(last_loaded.entry_id);

        let record = EmotionRecord::new(
            cmd.user_id.clone(),
            cmd.date,
            entry_id,
            classification.scores,
        );

        match self.emotions.save(&record).await? {
            SaveOutcome::Inserted => {
                info!(
                    user_id = %cmd.user_id,
                    date = %cmd.date,
                    entry_id = %entry_id,
                    defaulted = classification.defaulted,
                    "Stored emotion analysis"
                );
                Ok(AnalysisOutcome::Analyzed {
                    record,
                    defaulted: classification.defaulted,
                })
            }
            SaveOutcome::AlreadyExists => {
                debug!(
                    user_id = %cmd.user_id,
                    date = %cmd.date,
                    "Concurrent run stored the record first"
                );
                Ok(AnalysisOutcome::AlreadyAnalyzed)
            }
        }
    }
}
