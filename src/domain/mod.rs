//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `emotion` - Emotion scores, stored emotion records, and journal entries
//! - `dashboard` - Pure aggregation of an emotion series into dashboard metrics

pub mod dashboard;
pub mod emotion;
pub mod foundation;
