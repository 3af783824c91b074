//! AI adapters: LLM providers and the emotion classifiers built on them.

mod anthropic_provider;
mod gemini_provider;
mod http_support;
mod llm_emotion_classifier;
mod mock_emotion_classifier;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use llm_emotion_classifier::{parse_scores, LlmEmotionClassifier};
pub use mock_emotion_classifier::{MockClassification, MockEmotionClassifier};
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
