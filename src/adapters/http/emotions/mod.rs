//! Emotions HTTP adapter module.
//!
//! REST endpoints for manual analysis, the dashboard, stored records and
//! scheduler health.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{EmotionsAppState, EmotionsApiError};
pub use routes::emotion_routes;
