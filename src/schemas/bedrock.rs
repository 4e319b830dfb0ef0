//! Bedrock `InvokeModel` request and response bodies
//!
//! Each supported provider family has its own JSON shape. Only the fields the
//! service reads or writes are modelled.

use serde::{Deserialize, Serialize};

/// Messages API version required by Anthropic models on Bedrock
pub const ANTHROPIC_BEDROCK_VERSION: &str = "bedrock-2023-05-31";

// ============================================================================
// Amazon Titan text completion
// ============================================================================

/// Titan text-completion request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextRequest {
    pub input_text: String,
    pub text_generation_config: TitanTextGenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextGenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_token_count: u32,
    pub stop_sequences: Vec<String>,
}

/// Titan text-completion response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextResponse {
    #[serde(default)]
    pub results: Vec<TitanTextResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitanTextResult {
    #[serde(default)]
    pub output_text: Option<String>,
}

impl TitanTextResponse {
    /// `results[0].outputText`
    pub fn output_text(&self) -> Option<&str> {
        self.results.first()?.output_text.as_deref()
    }
}

// ============================================================================
// Anthropic messages
// ============================================================================

/// Anthropic messages request as accepted by Bedrock
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessagesRequest {
    pub anthropic_version: String,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

impl AnthropicMessage {
    /// A single-turn user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Anthropic messages response
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicMessagesResponse {
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl AnthropicMessagesResponse {
    /// `content[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.content.first()?.text.as_deref()
    }
}
