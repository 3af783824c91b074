//! Emotion scheduler configuration

use chrono::NaiveTime;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::EmotionSchedulerConfig;

/// Scheduler timing and pacing
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSettings {
    /// Start the background loop with the server
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Local wall-clock minute of the daily run, `HH:MM`
    #[serde(default = "default_trigger_time")]
    pub trigger_time: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_post_trigger_pause")]
    pub post_trigger_pause_secs: u64,

    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,

    #[serde(default = "default_startup_sweep_days")]
    pub startup_sweep_days: u32,

    #[serde(default = "default_trigger_sweep_days")]
    pub trigger_sweep_days: u32,

    /// Pause between users in the daily run, milliseconds
    #[serde(default = "default_daily_pacing")]
    pub daily_pacing_ms: u64,

    /// Pause between analyses in a catch-up sweep, milliseconds
    #[serde(default = "default_sweep_pacing")]
    pub sweep_pacing_ms: u64,
}

impl SchedulerSettings {
    pub fn trigger_time(&self) -> Result<NaiveTime, ValidationError> {
        NaiveTime::parse_from_str(self.trigger_time.trim(), "%H:%M")
            .map_err(|_| ValidationError::InvalidTriggerTime(self.trigger_time.clone()))
    }

    pub fn daily_pacing(&self) -> Duration {
        Duration::from_millis(self.daily_pacing_ms)
    }

    pub fn sweep_pacing(&self) -> Duration {
        Duration::from_millis(self.sweep_pacing_ms)
    }

    /// Loop configuration for [`crate::application::EmotionScheduler`]
    pub fn loop_config(&self) -> Result<EmotionSchedulerConfig, ValidationError> {
        Ok(EmotionSchedulerConfig::default()
            .with_trigger_time(self.trigger_time()?)
            .with_poll_interval(Duration::from_secs(self.poll_interval_secs))
            .with_post_trigger_pause(Duration::from_secs(self.post_trigger_pause_secs))
            .with_error_backoff(Duration::from_secs(self.error_backoff_secs))
            .with_startup_sweep_days(self.startup_sweep_days)
            .with_trigger_sweep_days(self.trigger_sweep_days))
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.trigger_time()?;
        // A pause of 60s or more could skip the whole trigger minute.
        if self.poll_interval_secs == 0 || self.poll_interval_secs >= 60 {
            return Err(ValidationError::InvalidInterval("poll_interval_secs"));
        }
        if self.post_trigger_pause_secs == 0 {
            return Err(ValidationError::InvalidInterval("post_trigger_pause_secs"));
        }
        if self.error_backoff_secs == 0 {
            return Err(ValidationError::InvalidInterval("error_backoff_secs"));
        }
        Ok(())
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            trigger_time: default_trigger_time(),
            poll_interval_secs: default_poll_interval(),
            post_trigger_pause_secs: default_post_trigger_pause(),
            error_backoff_secs: default_error_backoff(),
            startup_sweep_days: default_startup_sweep_days(),
            trigger_sweep_days: default_trigger_sweep_days(),
            daily_pacing_ms: default_daily_pacing(),
            sweep_pacing_ms: default_sweep_pacing(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_trigger_time() -> String {
    "23:30".to_string()
}

fn default_poll_interval() -> u64 {
    30
}

fn default_post_trigger_pause() -> u64 {
    60
}

fn default_error_backoff() -> u64 {
    60
}

fn default_startup_sweep_days() -> u32 {
    7
}

fn default_trigger_sweep_days() -> u32 {
    3
}

fn default_daily_pacing() -> u64 {
    2000
}

fn default_sweep_pacing() -> u64 {
    1000
}
