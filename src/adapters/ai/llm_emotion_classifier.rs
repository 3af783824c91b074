//! Emotion classifier backed by an LLM completion.
//!
//! The model is asked for a bare JSON object with the seven emotion keys.
//! The first `{...}` object in the reply is parsed; missing keys count as
//! zero and out-of-range numbers are clamped into [0, 10].

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::domain::emotion::{Emotion, EmotionScore, EmotionScores};
use crate::ports::{AIProvider, ClassificationError, CompletionRequest, EmotionClassifier, MessageRole};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 256;

pub struct LlmEmotionClassifier {
    provider: Arc<dyn AIProvider>,
}

impl LlmEmotionClassifier {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    fn build_prompt(conversation: &str) -> String {
        let keys = Emotion::ALL
            .iter()
            .map(|e| format!("    \"{}\": 0", e.key()))
            .collect::<Vec<_>>()
            .join(",\n");

        format!(
            "Analyze the following conversation for emotional content and return ONLY a JSON \
             object with emotion scores (0-10 scale):\n\n\
             Conversation: {conversation}\n\n\
             Return format (no other text):\n{{\n{keys}\n}}\n\n\
             Rules:\n\
             - Score each emotion 0-10 based on intensity\n\
             - Multiple emotions can have high scores\n\
             - If no clear emotion, set neutral higher\n\
             - Return ONLY the JSON object\n"
        )
    }
}

#[async_trait]
impl EmotionClassifier for LlmEmotionClassifier {
    async fn classify(&self, text: &str) -> Result<EmotionScores, ClassificationError> {
        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyInput);
        }

        let request = CompletionRequest::new()
            .with_message(MessageRole::User, Self::build_prompt(text))
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS);

        let response = self.provider.complete(request).await?;
        tracing::debug!(
            provider = %self.provider.provider_info().name,
            tokens = response.usage.total_tokens,
            "classifier response received"
        );

        parse_scores(&response.content)
    }
}

/// Parses the first flat JSON object in `reply` into emotion scores.
pub fn parse_scores(reply: &str) -> Result<EmotionScores, ClassificationError> {
    let object = first_json_object(reply)
        .ok_or_else(|| ClassificationError::malformed("no JSON object in reply"))?;

    let fields: Map<String, Value> = serde_json::from_str(object)
        .map_err(|e| ClassificationError::malformed(format!("invalid JSON: {}", e)))?;

    Ok(EmotionScores::from_fn(|emotion| {
        fields
            .get(emotion.key())
            .and_then(numeric_value)
            .map(|v| EmotionScore::clamped(v.round() as i64))
            .unwrap_or(EmotionScore::ZERO)
    }))
}

/// Leftmost `{` followed by at least one non-`}` character and a closing `}`.
fn first_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        let body_len = text[start + 1..].find('}')?;
        if body_len > 0 {
            return Some(&text[start..start + body_len + 2]);
        }
        search_from = start + 1;
    }
    None
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
