//! Emotion module - emotion scores, stored analyses and journal input.

mod kind;
mod journal;
mod record;
mod scores;

pub use kind::Emotion;
pub use journal::{conversation_transcript, JournalEntry};
pub use record::EmotionRecord;
pub use scores::{EmotionScore, EmotionScores};
