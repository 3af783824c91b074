//! Integration tests for emotion HTTP endpoints.
//!
//! Drives the full router with `tower::ServiceExt::oneshot` over the
//! in-memory store, a fixed clock and the scripted classifier.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;

use mood_journal::adapters::ai::MockEmotionClassifier;
use mood_journal::adapters::clock::FixedClock;
use mood_journal::adapters::http::{emotion_routes, EmotionsAppState};
use mood_journal::adapters::memory::InMemoryStore;
use mood_journal::application::{
    AnalyzeUserDayHandler, CatchUpSweeper, ClassifierAdapter, DailyAnalysisHandler,
    EmotionScheduler, EmotionSchedulerConfig,
};
use mood_journal::domain::emotion::{EmotionRecord, EmotionScores};
use mood_journal::domain::foundation::{EntryId, UserId};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

struct TestApp {
    router: Router,
    store: Arc<InMemoryStore>,
    scheduler: EmotionScheduler,
}

fn test_app() -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let clock = Arc::new(FixedClock::new(day(10).and_hms_opt(14, 0, 0).unwrap()));
    let happy = EmotionScores::try_new(7, 1, 0, 0, 0, 0, 2).unwrap();
    let adapter = Arc::new(ClassifierAdapter::new(Arc::new(MockEmotionClassifier::always(happy))));
    let analyzer = Arc::new(AnalyzeUserDayHandler::new(store.clone(), store.clone(), adapter));
    let daily = Arc::new(DailyAnalysisHandler::new(
        store.clone(),
        analyzer.clone(),
        Duration::ZERO,
    ));
    let sweeper = Arc::new(CatchUpSweeper::new(
        store.clone(),
        store.clone(),
        analyzer.clone(),
        clock.clone(),
        Duration::ZERO,
    ));
    let scheduler = EmotionScheduler::new(
        analyzer,
        daily,
        sweeper,
        clock.clone(),
        EmotionSchedulerConfig::default(),
    );

    let state = EmotionsAppState {
        emotions: store.clone(),
        journal: store.clone(),
        clock,
        scheduler: scheduler.clone(),
    };

    TestApp {
        router: emotion_routes(state),
        store,
        scheduler,
    }
}

async fn send(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn seed(store: &InMemoryStore, id: &str, d: u32, entry: i64) {
    store
        .seed_emotions([EmotionRecord::new(
            user(id),
            day(d),
            EntryId::new(entry),
            EmotionScores::neutral_default(),
        )])
        .unwrap();
}

// =============================================================================
// Manual Analysis
// =============================================================================

#[tokio::test]
async fn analyze_single_user_reports_success() {
    let app = test_app();
    app.store.add_entry(&user("alice"), day(9), "entry", None).unwrap();

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/emotions/analyze?user_id=alice&target_date=2024-06-09",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"user_id": "alice", "date": "2024-06-09", "success": true})
    );
    assert_eq!(app.store.emotion_count(), 1);
}

#[tokio::test]
async fn analyze_without_user_runs_everyone_for_today() {
    let app = test_app();
    app.store.add_entry(&user("alice"), day(10), "entry", None).unwrap();
    app.store.add_entry(&user("bob"), day(10), "entry", None).unwrap();

    let (status, body) = send(&app.router, "POST", "/api/emotions/analyze").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-06-10");
    assert_eq!(body["message"], "Analysis completed for all users");
    assert_eq!(body["succeeded"], 2);
}

#[tokio::test]
async fn analyze_rejects_bad_date() {
    let app = test_app();

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/emotions/analyze?target_date=06/09/2024",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date format. Use YYYY-MM-DD");
    assert_eq!(app.store.emotion_count(), 0);
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn dashboard_for_new_user_has_default_shape() {
    let app = test_app();

    let (status, body) = send(&app.router, "GET", "/api/emotions/dashboard/newbie").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood_improvement"]["trend"], "neutral");
    assert_eq!(body["mood_journey"]["statistics"]["average_mood"], 3.0);
    assert_eq!(body["emotional_landscape"]["emotions"].as_array().unwrap().len(), 5);
    assert_eq!(body["progress"]["mood_stability"]["percentage"], 85.0);
    assert_eq!(body["period"]["days"], 30);
    assert_eq!(body["period"]["end_date"], "2024-06-10");
}

#[tokio::test]
async fn dashboard_days_must_be_in_range() {
    let app = test_app();

    for uri in [
        "/api/emotions/dashboard/alice?days=0",
        "/api/emotions/dashboard/alice?days=366",
        "/api/emotions/dashboard/alice?days=month",
    ] {
        let (status, body) = send(&app.router, "GET", uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    let (status, body) = send(&app.router, "GET", "/api/emotions/dashboard/alice?days=365").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"]["start_date"], "2023-06-12");
}

// =============================================================================
// Records and Health
// =============================================================================

#[tokio::test]
async fn list_filters_records() {
    let app = test_app();
    seed(&app.store, "alice", 8, 1);
    seed(&app.store, "alice", 9, 2);
    seed(&app.store, "bob", 9, 3);

    let (_, all) = send(&app.router, "GET", "/api/emotions").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
    assert_eq!(all[0]["journal_date"], "2024-06-09");

    let (_, alice) = send(&app.router, "GET", "/api/emotions?user_id=alice").await;
    assert_eq!(alice.as_array().unwrap().len(), 2);

    let (_, on_day) = send(&app.router, "GET", "/api/emotions?journal_date=2024-06-09").await;
    assert_eq!(on_day.as_array().unwrap().len(), 2);
    assert_eq!(on_day[0]["neutral"], 5);
}

#[tokio::test]
async fn summary_is_ascending_within_range() {
    let app = test_app();
    for d in 1..=6 {
        seed(&app.store, "alice", d, i64::from(d));
    }

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/emotions/summary/alice?start_date=2024-06-02&end_date=2024-06-04",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["journal_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-06-02", "2024-06-03", "2024-06-04"]);
}

#[tokio::test]
async fn entry_lookup_finds_anchor_or_404() {
    let app = test_app();
    seed(&app.store, "alice", 9, 42);

    let (status, body) = send(&app.router, "GET", "/api/emotions/entry/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "alice");
    assert_eq!(body["entry_id"], 42);

    let (status, body) = send(&app.router, "GET", "/api/emotions/entry/41").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app.router, "GET", "/api/emotions/entry/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_scheduler_state() {
    let app = test_app();

    let (status, body) = send(&app.router, "GET", "/api/emotions/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["scheduler_running"], false);
    assert_eq!(body["timestamp"], "2024-06-10T14:00:00");

    let handle = app.scheduler.start().unwrap();
    let (_, body) = send(&app.router, "GET", "/api/emotions/health").await;
    assert_eq!(body["scheduler_running"], true);

    handle.stop().await.unwrap();
    let (_, body) = send(&app.router, "GET", "/api/emotions/health").await;
    assert_eq!(body["scheduler_running"], false);
}
