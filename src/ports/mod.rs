//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `EmotionRepository` - One emotion record per (user, journal day)
//! - `JournalReader` - Read-only view of journal entries written elsewhere
//!
//! ## Analysis Ports
//!
//! - `EmotionClassifier` - Text to seven emotion scores
//! - `AIProvider` - LLM completions backing the classifier
//!
//! ## Time
//!
//! - `Clock` - Local wall clock, swappable in tests

mod ai_provider;
mod clock;
mod emotion_classifier;
mod emotion_repository;
mod journal_reader;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use clock::Clock;
pub use emotion_classifier::{ClassificationError, EmotionClassifier};
pub use emotion_repository::{EmotionFilter, EmotionRepository, SaveOutcome};
pub use journal_reader::JournalReader;
