//! Emotion classifier port.

use async_trait::async_trait;

use super::AIError;
use crate::domain::emotion::EmotionScores;

/// Turns a day's conversation transcript into seven emotion scores.
///
/// Implementations may fail; the application layer wraps every classifier
/// so that a failure still yields a storable (default) vector.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<EmotionScores, ClassificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),

    #[error("nothing to classify")]
    EmptyInput,
}

impl ClassificationError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Returns true if trying again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClassificationError::Provider(err) => err.is_retryable(),
            ClassificationError::MalformedResponse(_) | ClassificationError::EmptyInput => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_keep_their_retry_classification() {
        assert!(ClassificationError::from(AIError::rate_limited(5)).is_retryable());
        assert!(!ClassificationError::from(AIError::AuthenticationFailed).is_retryable());
    }

    #[test]
    fn malformed_output_is_not_retryable() {
        let err = ClassificationError::malformed("no JSON object");
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "malformed classifier response: no JSON object");
    }
}
