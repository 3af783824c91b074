//! Emotion query handlers.
//!
//! Read-only handlers over stored analyses: the dashboard and record lookups.

mod get_emotion_dashboard;
mod get_emotion_summary;
mod get_emotions_by_entry;
mod list_emotions;

pub use get_emotion_dashboard::{
    GetEmotionDashboardHandler, GetEmotionDashboardQuery, GetEmotionDashboardResult,
    DEFAULT_DASHBOARD_DAYS,
};
pub use get_emotion_summary::{
    GetEmotionSummaryHandler, GetEmotionSummaryQuery, GetEmotionSummaryResult,
};
pub use get_emotions_by_entry::{
    GetEmotionsByEntryHandler, GetEmotionsByEntryQuery, GetEmotionsByEntryResult,
};
pub use list_emotions::{ListEmotionsHandler, ListEmotionsQuery, ListEmotionsResult};
