//! Emotion analysis handlers.
//!
//! Single-day analysis plus the two batch drivers built on it.

mod analyze_user_day;
mod catch_up_sweep;
mod daily_analysis;

pub use analyze_user_day::{
    AnalysisOutcome, AnalyzeUserDayCommand, AnalyzeUserDayHandler, AnalyzeUserDayResult,
};
pub use catch_up_sweep::{CatchUpSweeper, SweepReport};
pub use daily_analysis::{
    DailyAnalysisCommand, DailyAnalysisHandler, DailyAnalysisReport, DailyAnalysisResult,
};
