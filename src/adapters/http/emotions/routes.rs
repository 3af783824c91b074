//! HTTP routes for emotion endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    get_by_entry, get_dashboard, get_summary, health, list_emotions, run_manual_analysis,
    EmotionsAppState,
};

/// Creates the emotions router with all routes.
pub fn emotion_routes(state: EmotionsAppState) -> Router {
    Router::new()
        .route("/api/emotions", get(list_emotions))
        .route("/api/emotions/analyze", post(run_manual_analysis))
        .route("/api/emotions/health", get(health))
        .route("/api/emotions/dashboard/:user_id", get(get_dashboard))
        .route("/api/emotions/summary/:user_id", get(get_summary))
        .route("/api/emotions/entry/:entry_id", get(get_by_entry))
        .with_state(state)
}
