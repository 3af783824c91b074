//! Integration tests for the emotion analysis engine.
//!
//! Runs the real handlers over the in-memory store with the LLM classifier
//! backed by a scripted provider:
//! 1. Replies are parsed, clamped and stored once per (user, day)
//! 2. Provider failures degrade to the default vector
//! 3. Re-runs, sweeps and concurrent batches never duplicate records

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use mood_journal::adapters::ai::{LlmEmotionClassifier, MockAIProvider, MockError};
use mood_journal::adapters::clock::FixedClock;
use mood_journal::adapters::memory::InMemoryStore;
use mood_journal::application::{
    AnalyzeUserDayHandler, CatchUpSweeper, ClassifierAdapter, ClassifierPolicy,
    DailyAnalysisCommand, DailyAnalysisHandler, GetEmotionDashboardHandler,
    GetEmotionDashboardQuery,
};
use mood_journal::domain::emotion::{Emotion, EmotionScores};
use mood_journal::domain::foundation::UserId;
use mood_journal::ports::EmotionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

struct Engine {
    store: Arc<InMemoryStore>,
    provider: MockAIProvider,
    daily: DailyAnalysisHandler,
    sweeper: CatchUpSweeper,
}

fn engine(provider: MockAIProvider, today: NaiveDate) -> Engine {
    let store = Arc::new(InMemoryStore::new());
    let classifier = Arc::new(LlmEmotionClassifier::new(Arc::new(provider.clone())));
    let policy = ClassifierPolicy::default().with_initial_backoff(Duration::from_millis(1));
    let adapter = Arc::new(ClassifierAdapter::with_policy(classifier, policy));
    let analyzer = Arc::new(AnalyzeUserDayHandler::new(
        store.clone(),
        store.clone(),
        adapter,
    ));
    let clock = Arc::new(FixedClock::new(today.and_hms_opt(23, 30, 0).unwrap()));

    Engine {
        daily: DailyAnalysisHandler::new(store.clone(), analyzer.clone(), Duration::ZERO),
        sweeper: CatchUpSweeper::new(
            store.clone(),
            store.clone(),
            analyzer,
            clock,
            Duration::ZERO,
        ),
        store,
        provider,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn llm_reply_is_parsed_clamped_and_stored() {
    let provider = MockAIProvider::new().with_response(
        "Here you go:\n{\"happy\": 12, \"anxious\": 3.6, \"sad\": -2, \"neutral\": \"4\"}\nTake care!",
    );
    let e = engine(provider, day(10));
    let alice = user("alice");
    e.store
        .add_entry(&alice, day(10), "Got the job!", Some("Congratulations!"))
        .unwrap();

    let report = e
        .daily
        .handle(DailyAnalysisCommand { date: day(10) })
        .await
        .unwrap();
    assert_eq!(report.succeeded, 1);

    let record = e.store.find_for_day(&alice, day(10)).await.unwrap().unwrap();
    assert_eq!(record.scores.get(Emotion::Happy).value(), 10);
    assert_eq!(record.scores.get(Emotion::Anxious).value(), 4);
    assert_eq!(record.scores.get(Emotion::Sad).value(), 0);
    assert_eq!(record.scores.get(Emotion::Neutral).value(), 4);
    assert_eq!(record.scores.get(Emotion::Stressed).value(), 0);

    let prompt = &e.provider.get_calls()[0];
    let sent = prompt
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(sent.contains("User: Got the job!\nAI: Congratulations!"));
}

#[tokio::test]
async fn quota_exhaustion_stores_default_vector_without_retrying() {
    let provider = MockAIProvider::new().with_error(MockError::QuotaExceeded);
    let e = engine(provider, day(10));
    let alice = user("alice");
    e.store.add_entry(&alice, day(10), "meh", None).unwrap();

    let report = e
        .daily
        .handle(DailyAnalysisCommand { date: day(10) })
        .await
        .unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(e.provider.call_count(), 1);
    let record = e.store.find_for_day(&alice, day(10)).await.unwrap().unwrap();
    assert_eq!(record.scores, EmotionScores::neutral_default());
}

#[tokio::test]
async fn reruns_and_sweeps_never_reclassify() {
    let e = engine(MockAIProvider::new(), day(10));
    for d in [7, 8, 9, 10] {
        e.store.add_entry(&user("alice"), day(d), "entry", None).unwrap();
    }
    e.store.add_entry(&user("bob"), day(10), "entry", None).unwrap();

    e.daily.handle(DailyAnalysisCommand { date: day(10) }).await.unwrap();
    e.daily.handle(DailyAnalysisCommand { date: day(10) }).await.unwrap();
    let first_sweep = e.sweeper.sweep(3).await;
    let second_sweep = e.sweeper.sweep(3).await;

    assert_eq!(first_sweep.filled, 3);
    assert_eq!(second_sweep.missing, 0);
    assert_eq!(e.store.emotion_count(), 5);
    assert_eq!(e.provider.call_count(), 5);
}

#[tokio::test]
async fn concurrent_batches_leave_one_record_per_day() {
    let e = engine(MockAIProvider::new(), day(10));
    for id in ["alice", "bob", "carol", "dave"] {
        e.store.add_entry(&user(id), day(10), "entry", None).unwrap();
    }

    let (a, b) = tokio::join!(
        e.daily.handle(DailyAnalysisCommand { date: day(10) }),
        e.daily.handle(DailyAnalysisCommand { date: day(10) }),
    );

    assert_eq!(a.unwrap().succeeded, 4);
    assert_eq!(b.unwrap().succeeded, 4);
    assert_eq!(e.store.emotion_count(), 4);
}

#[tokio::test]
async fn dashboard_reflects_stored_analyses() {
    let provider = MockAIProvider::new()
        .with_response(r#"{"happy": 1, "sad": 5}"#)
        .with_response(r#"{"happy": 5, "sad": 1}"#);
    let e = engine(provider, day(10));
    let alice = user("alice");
    e.store.add_entry(&alice, day(9), "hard day", None).unwrap();
    e.store.add_entry(&alice, day(10), "better day", None).unwrap();

    e.daily.handle(DailyAnalysisCommand { date: day(9) }).await.unwrap();
    e.daily.handle(DailyAnalysisCommand { date: day(10) }).await.unwrap();

    let clock = Arc::new(FixedClock::new(day(10).and_hms_opt(12, 0, 0).unwrap()));
    let dashboard = GetEmotionDashboardHandler::new(e.store.clone(), e.store.clone(), clock)
        .handle(GetEmotionDashboardQuery {
            user_id: alice,
            days: 7,
        })
        .await
        .unwrap();

    assert_eq!(dashboard.mood_journey.statistics.total_days, 2);
    assert_eq!(dashboard.mood_improvement.percentage, 200.0);
    assert_eq!(dashboard.progress.journaling_streak.current_days, 2);
    assert_eq!(dashboard.progress.good_days.count, 1);
}
