//! Failure-absorbing wrapper around the emotion classifier port.
//!
//! Every attempt gets its own deadline. Retryable failures (rate limits,
//! outages, timeouts) are retried with exponential backoff; anything else,
//! or running out of retries, yields the neutral default vector. The
//! adapter never returns an error, so a failed classification still
//! produces a storable record and the day is not retried forever.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use crate::domain::emotion::EmotionScores;
use crate::ports::{AIError, ClassificationError, EmotionClassifier};

/// Timeout and retry settings for classifier calls.
#[derive(Debug, Clone)]
pub struct ClassifierPolicy {
    /// Deadline for a single classifier call.
    pub attempt_timeout: Duration,
    /// Retries after the first attempt for retryable failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub initial_backoff: Duration,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(30),
            max_retries: 2,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl ClassifierPolicy {
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }
}

/// Scores produced for one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub scores: EmotionScores,
    /// True when the classifier failed and the default vector was used.
    pub defaulted: bool,
}

pub struct ClassifierAdapter {
    classifier: Arc<dyn EmotionClassifier>,
    policy: ClassifierPolicy,
}

impl ClassifierAdapter {
    pub fn new(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self::with_policy(classifier, ClassifierPolicy::default())
    }

    pub fn with_policy(classifier: Arc<dyn EmotionClassifier>, policy: ClassifierPolicy) -> Self {
        Self { classifier, policy }
    }

    /// Classifies the transcript, falling back to the default vector.
    pub async fn classify(&self, text: &str) -> Classification {
        match self.classify_with_retries(text).await {
            Ok(scores) => Classification {
                scores,
                defaulted: false,
            },
            Err(err) => {
                tracing::warn!(error = %err, "emotion classification failed, using default scores");
                Classification {
                    scores: EmotionScores::neutral_default(),
                    defaulted: true,
                }
            }
        }
    }

    async fn classify_with_retries(&self, text: &str) -> Result<EmotionScores, ClassificationError> {
        let mut retry_count = 0;
        loop {
            let attempt = match timeout(self.policy.attempt_timeout, self.classifier.classify(text)).await {
                Ok(result) => result,
                Err(_) => Err(ClassificationError::Provider(AIError::Timeout {
                    timeout_secs: self.policy.attempt_timeout.as_secs() as u32,
                })),
            };

            match attempt {
                Ok(scores) => return Ok(scores),
                Err(err) if err.is_retryable() && retry_count < self.policy.max_retries => {
                    let delay = self.policy.initial_backoff * 2u32.pow(retry_count);
                    tracing::debug!(error = %err, retry_count, ?delay, "retrying emotion classification");
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
