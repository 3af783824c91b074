//! Mood Journal - emotion analysis backend for a journaling app.
//!
//! A background scheduler classifies each user's journal day into seven
//! emotion scores with an LLM, exactly once per (user, day), and a read
//! side aggregates the stored scores into a mood dashboard.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
