//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! the analysis engine (single day, daily batch, catch-up sweep), the
//! scheduler that drives it, and the read-side dashboard and record queries.

mod classifier_adapter;
pub mod handlers;
pub mod scheduler;

pub use classifier_adapter::{Classification, ClassifierAdapter, ClassifierPolicy};
pub use handlers::analysis::{
    AnalysisOutcome, AnalyzeUserDayCommand, AnalyzeUserDayHandler, CatchUpSweeper,
    DailyAnalysisCommand, DailyAnalysisHandler, DailyAnalysisReport, SweepReport,
};
pub use handlers::emotions::{
    GetEmotionDashboardHandler, GetEmotionDashboardQuery, GetEmotionSummaryHandler,
    GetEmotionSummaryQuery, GetEmotionsByEntryHandler, GetEmotionsByEntryQuery,
    ListEmotionsHandler, ListEmotionsQuery, DEFAULT_DASHBOARD_DAYS,
};
pub use scheduler::{
    EmotionScheduler, EmotionSchedulerConfig, ManualAnalysisOutcome, PollOutcome,
    SchedulerError, SchedulerHandle, SchedulerStatus,
};
