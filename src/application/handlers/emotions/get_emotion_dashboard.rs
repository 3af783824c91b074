//! GetEmotionDashboardHandler - Query handler for the mood dashboard.
//!
//! Reads the user's emotion series and journal activity for the window
//! ending today and hands them to the pure dashboard aggregation. Nothing
//! is cached; every request recomputes from storage.

use std::sync::Arc;

use crate::domain::dashboard::{
    DashboardPeriod, EmotionDashboard, JournalActivity, STREAK_LOOKBACK_ENTRIES,
};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{Clock, EmotionRepository, JournalReader};

/// Window used when the caller does not pick one.
pub const DEFAULT_DASHBOARD_DAYS: u32 = 30;

#[derive(Debug, Clone)]
pub struct GetEmotionDashboardQuery {
    pub user_id: UserId,
    /// Window length in days, 1 to 365.
    pub days: u32,
}

pub type GetEmotionDashboardResult = EmotionDashboard;

pub struct GetEmotionDashboardHandler {
    emotions: Arc<dyn EmotionRepository>,
    journal: Arc<dyn JournalReader>,
    clock: Arc<dyn Clock>,
}

impl GetEmotionDashboardHandler {
    pub fn new(
        emotions: Arc<dyn EmotionRepository>,
        journal: Arc<dyn JournalReader>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            emotions,
            journal,
            clock,
        }
    }

    pub async fn handle(
        &self,
        query: GetEmotionDashboardQuery,
    ) -> Result<GetEmotionDashboardResult, DomainError> {
        let period = DashboardPeriod::ending_on(self.clock.today(), query.days)?;
        let (week_start, week_end) = period.trailing_week();
        let user_id = &query.user_id;

        let (series, recent_entry_dates, entries_this_week, entries_in_period) = futures::try_join!(
            self.emotions
                .find_in_range(user_id, period.start_date, period.end_date),
            self.journal
                .recent_entry_dates(user_id, STREAK_LOOKBACK_ENTRIES),
            self.journal.count_entries(user_id, week_start, week_end),
            self.journal
                .count_entries(user_id, period.start_date, period.end_date),
        )?;

        let activity = JournalActivity {
            recent_entry_dates,
            entries_this_week,
            entries_in_period,
        };
        Ok(EmotionDashboard::compute(period, &series, &activity))
    }
}
