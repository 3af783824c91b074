//! Background scheduling of emotion analysis.

mod emotion_scheduler;

pub use emotion_scheduler::{
    EmotionScheduler, EmotionSchedulerConfig, ManualAnalysisOutcome, PollOutcome,
    SchedulerError, SchedulerHandle, SchedulerStatus,
};
