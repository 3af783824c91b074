//! Scripted emotion classifier for tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::emotion::EmotionScores;
use crate::ports::{AIError, ClassificationError, EmotionClassifier};

/// One scripted classifier outcome.
#[derive(Debug, Clone)]
pub enum MockClassification {
    Scores(EmotionScores),
    QuotaExceeded,
    RateLimited,
    Unavailable,
    Malformed,
    /// Sleeps for the given time before answering with the fallback scores.
    Hang(Duration),
}

/// Classifier that replays scripted outcomes in order, then answers with a
/// fixed fallback vector. Records every input text.
#[derive(Debug, Clone)]
pub struct MockEmotionClassifier {
    script: Arc<Mutex<VecDeque<MockClassification>>>,
    fallback: EmotionScores,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockEmotionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmotionClassifier {
    pub fn new() -> Self {
        Self::always(EmotionScores::neutral_default())
    }

    /// Answers every call with `scores` unless something is scripted.
    pub fn always(scores: EmotionScores) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: scores,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues an outcome for the next unscripted call.
    pub fn then(self, outcome: MockClassification) -> Self {
        lock(&self.script).push_back(outcome);
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Texts passed to `classify`, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }
}

/// Ignores poisoning; the mock has no invariants to protect.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl EmotionClassifier for MockEmotionClassifier {
    async fn classify(&self, text: &str) -> Result<EmotionScores, ClassificationError> {
        lock(&self.calls).push(text.to_string());

        let next = lock(&self.script).pop_front();
        match next {
            None => Ok(self.fallback),
            Some(MockClassification::Scores(scores)) => Ok(scores),
            Some(MockClassification::QuotaExceeded) => {
                Err(AIError::quota_exceeded("mock quota exhausted").into())
            }
            Some(MockClassification::RateLimited) => Err(AIError::rate_limited(1).into()),
            Some(MockClassification::Unavailable) => Err(AIError::unavailable("mock outage").into()),
            Some(MockClassification::Malformed) => {
                Err(ClassificationError::malformed("mock reply without JSON"))
            }
            Some(MockClassification::Hang(duration)) => {
                sleep(duration).await;
                Ok(self.fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_then_fallback() {
        let happy = EmotionScores::try_new(8, 0, 0, 0, 0, 0, 1).unwrap();
        let classifier = MockEmotionClassifier::new()
            .then(MockClassification::Scores(happy))
            .then(MockClassification::QuotaExceeded);

        assert_eq!(classifier.classify("a").await.unwrap(), happy);
        assert!(classifier.classify("b").await.is_err());
        assert_eq!(
            classifier.classify("c").await.unwrap(),
            EmotionScores::neutral_default()
        );
        assert_eq!(classifier.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn scripted_errors_keep_retry_classification() {
        let classifier = MockEmotionClassifier::new()
            .then(MockClassification::RateLimited)
            .then(MockClassification::Malformed);

        assert!(classifier.classify("x").await.unwrap_err().is_retryable());
        assert!(!classifier.classify("x").await.unwrap_err().is_retryable());
    }
}
