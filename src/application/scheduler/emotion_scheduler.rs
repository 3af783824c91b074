//! EmotionScheduler - Background service driving nightly emotion analysis.
//!
//! Polls the wall clock and, at the configured trigger minute, analyzes the
//! current day for every active user and then sweeps the last few days for
//! anything missed. On start it sweeps a longer window so downtime heals.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `trigger_time` | 23:30 | Local minute at which the daily run fires |
//! | `poll_interval` | 30s | Pause between clock checks |
//! | `post_trigger_pause` | 60s | Pause after a daily run |
//! | `error_backoff` | 60s | Pause after a failed or panicked iteration |
//! | `startup_sweep_days` | 7 | Days swept when the loop starts |
//! | `trigger_sweep_days` | 3 | Days swept after each daily run |
//!
//! ## Shutdown
//!
//! Stopping is cooperative: the loop notices the request at the top of an
//! iteration or while pausing, so in-flight analysis finishes first.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, Timelike};
use futures::FutureExt;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{error, info};

use crate::application::handlers::analysis::{
    AnalyzeUserDayCommand, AnalyzeUserDayHandler, CatchUpSweeper, DailyAnalysisCommand,
    DailyAnalysisHandler, DailyAnalysisReport, SweepReport,
};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::Clock;

/// Configuration for the EmotionScheduler service.
#[derive(Debug, Clone)]
pub struct EmotionSchedulerConfig {
    pub trigger_time: NaiveTime,
    pub poll_interval: Duration,
    pub post_trigger_pause: Duration,
    pub error_backoff: Duration,
    pub startup_sweep_days: u32,
    pub trigger_sweep_days: u32,
}

impl Default for EmotionSchedulerConfig {
    fn default() -> Self {
        Self {
            trigger_time: NaiveTime::from_hms_opt(23, 30, 0).unwrap_or_default(),
            poll_interval: Duration::from_secs(30),
            post_trigger_pause: Duration::from_secs(60),
            error_backoff: Duration::from_secs(60),
            startup_sweep_days: 7,
            trigger_sweep_days: 3,
        }
    }
}

impl EmotionSchedulerConfig {
    pub fn with_trigger_time(mut self, trigger_time: NaiveTime) -> Self {
        self.trigger_time = trigger_time;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_post_trigger_pause(mut self, pause: Duration) -> Self {
        self.post_trigger_pause = pause;
        self
    }

    pub fn with_error_backoff(mut self, backoff: Duration) -> Self {
        self.error_backoff = backoff;
        self
    }

    pub fn with_startup_sweep_days(mut self, days: u32) -> Self {
        self.startup_sweep_days = days;
        self
    }

    pub fn with_trigger_sweep_days(mut self, days: u32) -> Self {
        self.trigger_sweep_days = days;
        self
    }
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Emotion scheduler is already running")]
    AlreadyRunning,

    #[error("Emotion scheduler task failed: {0}")]
    TaskFailed(String),
}

/// Snapshot reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchedulerStatus {
    pub running: bool,
    pub last_trigger_date: Option<NaiveDate>,
}

/// Result of one clock check.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// Not the trigger minute, or today's run already fired.
    Idle,
    Triggered {
        report: DailyAnalysisReport,
        sweep: SweepReport,
    },
}

/// Result of an out-of-schedule analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualAnalysisOutcome {
    User {
        user_id: UserId,
        date: NaiveDate,
        success: bool,
    },
    AllUsers(DailyAnalysisReport),
}

/// Handle to a started scheduler loop. Dropping it also stops the loop.
pub struct SchedulerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Asks the loop to exit; returns immediately.
    pub fn request_stop(&self) {
        // Fails only once the loop has already exited.
        let _ = self.stop_tx.send(true);
    }

    /// Waits for the loop to exit.
    pub async fn join(self) -> Result<(), SchedulerError> {
        self.task
            .await
            .map_err(|e| SchedulerError::TaskFailed(e.to_string()))
    }

    pub async fn stop(self) -> Result<(), SchedulerError> {
        self.request_stop();
        self.join().await
    }
}

/// Cloneable front of the scheduler; clones share one loop state.
#[derive(Clone)]
pub struct EmotionScheduler {
    core: Arc<SchedulerCore>,
}

struct SchedulerCore {
    analyzer: Arc<AnalyzeUserDayHandler>,
    daily: Arc<DailyAnalysisHandler>,
    sweeper: Arc<CatchUpSweeper>,
    clock: Arc<dyn Clock>,
    config: EmotionSchedulerConfig,
    running: AtomicBool,
    last_trigger_date: Mutex<Option<NaiveDate>>,
}

impl EmotionScheduler {
    pub fn new(
        analyzer: Arc<AnalyzeUserDayHandler>,
        daily: Arc<DailyAnalysisHandler>,
        sweeper: Arc<CatchUpSweeper>,
        clock: Arc<dyn Clock>,
        config: EmotionSchedulerConfig,
    ) -> Self {
        Self {
            core: Arc::new(SchedulerCore {
                analyzer,
                daily,
                sweeper,
                clock,
                config,
                running: AtomicBool::new(false),
                last_trigger_date: Mutex::new(None),
            }),
        }
    }

    /// Spawns the loop on the current tokio runtime.
    pub fn start(&self) -> Result<SchedulerHandle, SchedulerError> {
        if self
            .core
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = watch::channel(false);
        let core = self.core.clone();
        let task = tokio::spawn(async move { core.run(stop_rx).await });
        Ok(SchedulerHandle { stop_tx, task })
    }

    pub fn status(&self) -> SchedulerStatus {
        SchedulerStatus {
            running: self.core.running.load(Ordering::SeqCst),
            last_trigger_date: *self.core.last_trigger_guard(),
        }
    }

    /// Runs exactly one clock check (for testing).
    pub async fn poll_once(&self) -> Result<PollOutcome, DomainError> {
        self.core.poll_once().await
    }

    /// Analyzes one user, or every active user, for `date` (today when
    /// `None`). Works whether or not the loop is running.
    pub async fn run_manual_analysis(
        &self,
        user_id: Option<UserId>,
        date: Option<NaiveDate>,
    ) -> Result<ManualAnalysisOutcome, DomainError> {
        let date = date.unwrap_or_else(|| self.core.clock.today());
        info!(user_id = ?user_id.as_ref().map(UserId::as_str), date = %date, "Manual emotion analysis requested");

        match user_id {
            Some(user_id) => {
                let outcome = self
                    .core
                    .analyzer
                    .handle(AnalyzeUserDayCommand::new(user_id.clone(), date))
                    .await;
                Ok(ManualAnalysisOutcome::User {
                    user_id,
                    date,
                    success: outcome.is_success(),
                })
            }
            None => {
                let report = self.core.daily.handle(DailyAnalysisCommand { date }).await?;
                Ok(ManualAnalysisOutcome::AllUsers(report))
            }
        }
    }
}

/// Clears the running flag however the loop task ends.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SchedulerCore {
    async fn run(&self, mut stop: watch::Receiver<bool>) {
        let _running = RunningGuard(&self.running);
        info!(trigger_time = %self.config.trigger_time, "Emotion scheduler started");

        if self.config.startup_sweep_days > 0 {
            let sweep = self.sweeper.sweep(self.config.startup_sweep_days);
            if let Err(panic) = AssertUnwindSafe(sweep).catch_unwind().await {
                error!(panic = %panic_message(panic.as_ref()), "Startup catch-up sweep panicked");
            }
        }

        while !*stop.borrow() {
            let pause = match AssertUnwindSafe(self.poll_once()).catch_unwind().await {
                Ok(Ok(PollOutcome::Triggered { .. })) => self.config.post_trigger_pause,
                Ok(Ok(PollOutcome::Idle)) => self.config.poll_interval,
                Ok(Err(err)) => {
                    error!(error = %err, "Emotion scheduler iteration failed");
                    self.config.error_backoff
                }
                Err(panic) => {
                    error!(panic = %panic_message(panic.as_ref()), "Emotion scheduler iteration panicked");
                    self.config.error_backoff
                }
            };

            if stop_requested_during(&mut stop, pause).await {
                break;
            }
        }

        info!("Emotion scheduler stopped");
    }

    async fn poll_once(&self) -> Result<PollOutcome, DomainError> {
        let now = self.clock.now();
        let trigger = self.config.trigger_time;
        if now.hour() != trigger.hour() || now.minute() != trigger.minute() {
            return Ok(PollOutcome::Idle);
        }

        let today = now.date();
        {
            let mut last = self.last_trigger_guard();
            if *last == Some(today) {
                return Ok(PollOutcome::Idle);
            }
            *last = Some(today);
        }

        info!(date = %today, "Daily emotion analysis triggered");
        let daily = self.daily.handle(DailyAnalysisCommand { date: today }).await;
        // Past days heal even when today's batch could not run.
        let sweep = self.sweeper.sweep(self.config.trigger_sweep_days).await;
        let report = daily?;
        Ok(PollOutcome::Triggered { report, sweep })
    }

    fn last_trigger_guard(&self) -> std::sync::MutexGuard<'_, Option<NaiveDate>> {
        self.last_trigger_date
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }
}

/// Sleeps for `pause` unless a stop arrives first. A dropped sender counts
/// as a stop.
async fn stop_requested_during(stop: &mut watch::Receiver<bool>, pause: Duration) -> bool {
    let sleep = time::sleep(pause);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return *stop.borrow(),
            changed = stop.changed() => {
                if changed.is_err() || *stop.borrow() {
                    return true;
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[cfg(test)]
#[path = "emotion_scheduler_test.rs"]
mod emotion_scheduler_test;
