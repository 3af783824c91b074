//! CatchUpSweeper - Fills analyses missed for recent days.
//!
//! Walks back from yesterday, most recent day first, and analyzes every
//! (user, day) pair that has journal entries but no stored record. Used at
//! startup and after each daily trigger so downtime heals itself.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tokio::time::sleep;
use tracing::{info, warn};

use super::{AnalyzeUserDayCommand, AnalyzeUserDayHandler};
use crate::domain::foundation::DomainError;
use crate::ports::{Clock, EmotionRepository, JournalReader};

/// Tally of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub days_scanned: u32,
    /// Pairs with entries but no record when the sweep reached them.
    pub missing: usize,
    /// Records this sweep inserted.
    pub filled: usize,
    pub failed: usize,
}

pub struct CatchUpSweeper {
    emotions: Arc<dyn EmotionRepository>,
    journal: Arc<dyn JournalReader>,
    analyzer: Arc<AnalyzeUserDayHandler>,
    clock: Arc<dyn Clock>,
    pacing: Duration,
}

impl CatchUpSweeper {
    pub fn new(
        emotions: Arc<dyn EmotionRepository>,
        journal: Arc<dyn JournalReader>,
        analyzer: Arc<AnalyzeUserDayHandler>,
        clock: Arc<dyn Clock>,
        pacing: Duration,
    ) -> Self {
        Self {
            emotions,
            journal,
            analyzer,
            clock,
            pacing,
        }
    }

    /// Sweeps the `days_back` days before today. Today itself is left to the
    /// daily trigger. A day whose users cannot be read is logged and skipped;
    /// a user whose record cannot be checked counts as failed.
    pub async fn sweep(&self, days_back: u32) -> SweepReport {
        let today = self.clock.today();
        let mut report = SweepReport::default();

        for offset in 1..=days_back {
            let Some(date) = today.checked_sub_days(Days::new(u64::from(offset))) else {
                break;
            };
            report.days_scanned += 1;
            if let Err(err) = self.sweep_day(date, &mut report).await {
                warn!(date = %date, error = %err, "Catch-up sweep skipped a day");
            }
        }

        info!(
            days_scanned = report.days_scanned,
            missing = report.missing,
            filled = report.filled,
            failed = report.failed,
            "Catch-up sweep finished"
        );
        report
    }

    async fn sweep_day(&self, date: NaiveDate, report: &mut SweepReport) -> Result<(), DomainError> {
        for user_id in self.journal.active_users_on(date).await? {
            match self.emotions.exists_for_day(&user_id, date).await {
                Ok(true) => continue,
                Ok(false) => report.missing += 1,
                Err(err) => {
                    warn!(user_id = %user_id, date = %date, error = %err, "Catch-up existence check failed");
                    report.failed += 1;
                    continue;
                }
            }

            let outcome = self
                .analyzer
                .handle(AnalyzeUserDayCommand::new(user_id, date))
                .await;
            if outcome.is_newly_analyzed() {
                report.filled += 1;
            } else if !outcome.is_success() {
                report.failed += 1;
            }

            if !self.pacing.is_zero() {
                sleep(self.pacing).await;
            }
        }
        Ok(())
    }
}
