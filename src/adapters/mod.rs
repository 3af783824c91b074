//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - LLM providers and the emotion classifiers built on them
//! - `postgres` - Journal and emotion storage
//! - `memory` - In-memory storage for tests and local runs
//! - `http` - Axum REST endpoints
//! - `clock` - System and fixed clocks

pub mod ai;
pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;

pub use ai::{LlmEmotionClassifier, MockEmotionClassifier};
pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryStore;
pub use postgres::{PostgresEmotionRepository, PostgresJournalReader};
