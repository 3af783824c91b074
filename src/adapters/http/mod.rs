//! HTTP adapters - REST API implementations.

pub mod emotions;

pub use emotions::{emotion_routes, EmotionsAppState};
