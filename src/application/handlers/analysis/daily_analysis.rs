//! DailyAnalysisHandler - Analyzes every active user for one journal day.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::{AnalyzeUserDayCommand, AnalyzeUserDayHandler};
use crate::domain::foundation::DomainError;
use crate::ports::JournalReader;

/// Command to run the batch for one date.
#[derive(Debug, Clone)]
pub struct DailyAnalysisCommand {
    pub date: NaiveDate,
}

/// Per-date tally of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAnalysisReport {
    pub date: NaiveDate,
    pub total_users: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub type DailyAnalysisResult = DailyAnalysisReport;

/// Runs [`AnalyzeUserDayHandler`] for each user with entries on the date,
/// sequentially, pausing between users to stay under provider rate limits.
pub struct DailyAnalysisHandler {
    journal: Arc<dyn JournalReader>,
    analyzer: Arc<AnalyzeUserDayHandler>,
    pacing: Duration,
}

impl DailyAnalysisHandler {
    pub fn new(
        journal: Arc<dyn JournalReader>,
        analyzer: Arc<AnalyzeUserDayHandler>,
        pacing: Duration,
    ) -> Self {
        Self {
            journal,
            analyzer,
            pacing,
        }
    }

    /// Fails only when the active-user list cannot be read; individual user
    /// failures are counted in the report.
    pub async fn handle(&self, cmd: DailyAnalysisCommand) -> Result<DailyAnalysisResult, DomainError> {
        let span = info_span!("daily_analysis", run_id = %Uuid::new_v4(), date = %cmd.date);
        self.run(cmd).instrument(span).await
    }

    async fn run(&self, cmd: DailyAnalysisCommand) -> Result<DailyAnalysisResult, DomainError> {
        let users = self.journal.active_users_on(cmd.date).await?;
        info!(date = %cmd.date, users = users.len(), "Starting daily emotion analysis");

        let mut report = DailyAnalysisReport {
            date: cmd.date,
            total_users: users.len(),
            succeeded: 0,
            failed: 0,
        };

        for (index, user_id) in users.into_iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                sleep(self.pacing).await;
            }
            let outcome = self
                .analyzer
                .handle(AnalyzeUserDayCommand::new(user_id, cmd.date))
                .await;
            if outcome.is_success() {
                report.succeeded += 1;
            } else {
                report.failed += 1;
            }
        }

        info!(
            date = %report.date,
            total_users = report.total_users,
            succeeded = report.succeeded,
            failed = report.failed,
            "Daily emotion analysis finished"
        );
        Ok(report)
    }
}
