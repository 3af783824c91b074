//! HTTP handlers for emotion endpoints.
//!
//! These handlers connect Axum routes to the scheduler and the emotion
//! query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;

use crate::application::{
    EmotionScheduler, GetEmotionDashboardHandler, GetEmotionDashboardQuery,
    GetEmotionSummaryHandler, GetEmotionSummaryQuery, GetEmotionsByEntryHandler,
    GetEmotionsByEntryQuery, ListEmotionsHandler, ListEmotionsQuery, DEFAULT_DASHBOARD_DAYS,
};
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, UserId};
use crate::ports::{Clock, EmotionRepository, JournalReader};

use super::dto::{
    AnalyzeParams, DashboardParams, EmotionDashboard, EmotionRecord, ErrorResponse,
    HealthResponse, ListEmotionsParams, ManualAnalysisResponse, SummaryParams,
};

const INVALID_DATE_MESSAGE: &str = "Invalid date format. Use YYYY-MM-DD";

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Emotions API error that implements IntoResponse.
#[derive(Debug)]
pub enum EmotionsApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for EmotionsApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            EmotionsApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            EmotionsApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg)),
            EmotionsApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<DomainError> for EmotionsApiError {
    fn from(error: DomainError) -> Self {
        match error.code {
            ErrorCode::ValidationFailed => EmotionsApiError::BadRequest(error.message),
            ErrorCode::NotFound => EmotionsApiError::NotFound(error.message),
            _ => {
                tracing::error!(error = %error, "Emotion request failed");
                EmotionsApiError::Internal(error.message)
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing emotion dependencies.
#[derive(Clone)]
pub struct EmotionsAppState {
    pub emotions: Arc<dyn EmotionRepository>,
    pub journal: Arc<dyn JournalReader>,
    pub clock: Arc<dyn Clock>,
    pub scheduler: EmotionScheduler,
}

impl EmotionsAppState {
    pub fn dashboard_handler(&self) -> GetEmotionDashboardHandler {
        GetEmotionDashboardHandler::new(
            self.emotions.clone(),
            self.journal.clone(),
            self.clock.clone(),
        )
    }

    pub fn list_handler(&self) -> ListEmotionsHandler {
        ListEmotionsHandler::new(self.emotions.clone())
    }

    pub fn summary_handler(&self) -> GetEmotionSummaryHandler {
        GetEmotionSummaryHandler::new(self.emotions.clone())
    }

    pub fn by_entry_handler(&self) -> GetEmotionsByEntryHandler {
        GetEmotionsByEntryHandler::new(self.emotions.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Parameter Parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, EmotionsApiError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| EmotionsApiError::BadRequest(INVALID_DATE_MESSAGE.to_string()))
        })
        .transpose()
}

fn parse_user_id(raw: &str) -> Result<UserId, EmotionsApiError> {
    UserId::new(raw.trim()).map_err(|e| EmotionsApiError::BadRequest(e.to_string()))
}

fn parse_optional_user_id(raw: Option<&str>) -> Result<Option<UserId>, EmotionsApiError> {
    raw.filter(|s| !s.trim().is_empty())
        .map(parse_user_id)
        .transpose()
}

fn parse_days(raw: Option<&str>) -> Result<u32, EmotionsApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_DASHBOARD_DAYS),
        Some(s) => s.parse().map_err(|_| {
            EmotionsApiError::BadRequest("days must be an integer between 1 and 365".to_string())
        }),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/emotions/analyze?user_id=&target_date=
///
/// Runs analysis now for one user, or every active user when `user_id` is
/// absent. The date defaults to today.
pub async fn run_manual_analysis(
    State(state): State<EmotionsAppState>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<ManualAnalysisResponse>, EmotionsApiError> {
    let date = parse_date(params.target_date.as_deref())?;
    let user_id = parse_optional_user_id(params.user_id.as_deref())?;

    let outcome = state.scheduler.run_manual_analysis(user_id, date).await?;
    Ok(Json(outcome.into()))
}

/// GET /api/emotions/dashboard/:user_id?days=30
pub async fn get_dashboard(
    State(state): State<EmotionsAppState>,
    Path(user_id): Path<String>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<EmotionDashboard>, EmotionsApiError> {
    let query = GetEmotionDashboardQuery {
        user_id: parse_user_id(&user_id)?,
        days: parse_days(params.days.as_deref())?,
    };

    let dashboard = state.dashboard_handler().handle(query).await?;
    Ok(Json(dashboard))
}

/// GET /api/emotions/health
pub async fn health(State(state): State<EmotionsAppState>) -> Json<HealthResponse> {
    let status = state.scheduler.status();
    Json(HealthResponse {
        status: "healthy",
        scheduler_running: status.running,
        last_trigger_date: status.last_trigger_date,
        timestamp: state.clock.now(),
    })
}

/// GET /api/emotions?user_id=&journal_date=
pub async fn list_emotions(
    State(state): State<EmotionsAppState>,
    Query(params): Query<ListEmotionsParams>,
) -> Result<Json<Vec<EmotionRecord>>, EmotionsApiError> {
    let query = ListEmotionsQuery {
        user_id: parse_optional_user_id(params.user_id.as_deref())?,
        journal_date: parse_date(params.journal_date.as_deref())?,
    };

    let records = state.list_handler().handle(query).await?;
    Ok(Json(records))
}

/// GET /api/emotions/summary/:user_id?start_date=&end_date=
pub async fn get_summary(
    State(state): State<EmotionsAppState>,
    Path(user_id): Path<String>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<Vec<EmotionRecord>>, EmotionsApiError> {
    let query = GetEmotionSummaryQuery {
        user_id: parse_user_id(&user_id)?,
        start_date: parse_date(params.start_date.as_deref())?,
        end_date: parse_date(params.end_date.as_deref())?,
    };

    let records = state.summary_handler().handle(query).await?;
    Ok(Json(records))
}

/// GET /api/emotions/entry/:entry_id
pub async fn get_by_entry(
    State(state): State<EmotionsAppState>,
    Path(entry_id): Path<String>,
) -> Result<Json<EmotionRecord>, EmotionsApiError> {
    let entry_id: EntryId = entry_id
        .parse()
        .map_err(|_| EmotionsApiError::BadRequest("Invalid entry ID format".to_string()))?;

    let record = state
        .by_entry_handler()
        .handle(GetEmotionsByEntryQuery { entry_id })
        .await?;
    Ok(Json(record))
}
