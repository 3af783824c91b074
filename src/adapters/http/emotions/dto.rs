//! HTTP DTOs for emotion endpoints.
//!
//! Records and dashboards are serialized straight from the domain types;
//! only query parameters, the manual-analysis reply and errors get their
//! own shapes here.

pub use crate::domain::dashboard::EmotionDashboard;
pub use crate::domain::emotion::EmotionRecord;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::application::ManualAnalysisOutcome;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters for `POST /api/emotions/analyze`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub user_id: Option<String>,
    pub target_date: Option<String>,
}

/// Query parameters for the dashboard. `days` stays a string so a bad value
/// gets the standard error body.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub days: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEmotionsParams {
    pub user_id: Option<String>,
    pub journal_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Reply to a manual analysis request.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ManualAnalysisResponse {
    User {
        user_id: String,
        date: NaiveDate,
        success: bool,
    },
    AllUsers {
        date: NaiveDate,
        message: String,
        total_users: usize,
        succeeded: usize,
        failed: usize,
    },
}

impl From<ManualAnalysisOutcome> for ManualAnalysisResponse {
    fn from(outcome: ManualAnalysisOutcome) -> Self {
        match outcome {
            ManualAnalysisOutcome::User {
                user_id,
                date,
                success,
            } => ManualAnalysisResponse::User {
                user_id: user_id.into(),
                date,
                success,
            },
            ManualAnalysisOutcome::AllUsers(report) => ManualAnalysisResponse::AllUsers {
                date: report.date,
                message: "Analysis completed for all users".to_string(),
                total_users: report.total_users,
                succeeded: report.succeeded,
                failed: report.failed,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub scheduler_running: bool,
    pub last_trigger_date: Option<NaiveDate>,
    pub timestamp: NaiveDateTime,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
