//! Chat-completions wire types.
//!
//! These match the OpenAI API specification, which Groq also speaks.
//! They are an adapter concern; domain types live in `textgate-core`.

use serde::{Deserialize, Serialize};

/// Request to a `/chat/completions` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier, fixed per provider.
    pub model: String,
    /// Single-turn conversation: one user message.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Generation cap.
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Single user message with the gateway's fixed sampling settings.
    #[must_use]
    pub fn single_turn(model: &str, text: &str) -> Self {
        Self {
            model: model.to_owned(),
            messages: vec![ChatMessage {
                role: "user".to_owned(),
                content: text.to_owned(),
            }],
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// One chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Response from a `/chat/completions` endpoint. Only the fields the
/// gateway consumes; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One generated choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}
