//! Model inference
//!
//! Turns a prompt into generated text: picks the provider calling convention
//! from the model id, serializes the provider's request body, invokes the
//! model once and reads the generated text from the provider's envelope.

use std::sync::Arc;

use crate::schemas::bedrock::{
    AnthropicMessage, AnthropicMessagesRequest, AnthropicMessagesResponse, TitanTextGenerationConfig,
    TitanTextRequest, TitanTextResponse, ANTHROPIC_BEDROCK_VERSION,
};
use crate::services::bedrock::{BedrockError, ModelInvoker};
use crate::utils::{log_preview, truncate_with_suffix};

/// Provider calling conventions supported by [`InferenceService`].
///
/// Adding a provider means adding a variant here; every body builder and
/// response parser matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelProvider {
    /// Amazon Titan text completion (`inputText` -> `results[0].outputText`)
    TitanText,
    /// Anthropic Claude messages (`messages` -> `content[0].text`)
    AnthropicClaude,
}

impl ModelProvider {
    /// Resolve the provider from a Bedrock model id.
    ///
    /// Cross-region inference profile prefixes (`us.`, `eu.`, `apac.`,
    /// `global.`) are accepted in front of the provider prefix.
    pub fn from_model_id(model_id: &str) -> Result<Self, InferenceError> {
        let base = strip_inference_profile(model_id);

        if base.starts_with("anthropic.claude") {
            Ok(ModelProvider::AnthropicClaude)
        } else if base.starts_with("amazon.titan-text") {
            Ok(ModelProvider::TitanText)
        } else {
            Err(InferenceError::UnsupportedModel(model_id.to_string()))
        }
    }

    /// Serialize the request body for this provider
    pub fn request_body(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<u8>, InferenceError> {
        let body = match self {
            ModelProvider::TitanText => serde_json::to_vec(&TitanTextRequest {
                input_text: prompt.to_string(),
                text_generation_config: TitanTextGenerationConfig {
                    temperature: params.temperature,
                    top_p: params.top_p.unwrap_or(1.0),
                    max_token_count: params.max_tokens,
                    stop_sequences: params.stop_sequences.clone(),
                },
            }),
            ModelProvider::AnthropicClaude => serde_json::to_vec(&AnthropicMessagesRequest {
                anthropic_version: ANTHROPIC_BEDROCK_VERSION.to_string(),
                messages: vec![AnthropicMessage::user(prompt)],
                max_tokens: params.max_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
                stop_sequences: params.stop_sequences.clone(),
            }),
        };

        body.map_err(|e| InferenceError::Serialization(e.to_string()))
    }

    /// Read the generated text out of this provider's response envelope.
    ///
    /// `Ok(None)` means the envelope parsed but held no text at the expected path.
    pub fn response_text(&self, body: &[u8]) -> Result<Option<String>, InferenceError> {
        let text = match self {
            ModelProvider::TitanText => serde_json::from_slice::<TitanTextResponse>(body)
                .map(|r| r.output_text().map(str::to_string)),
            ModelProvider::AnthropicClaude => serde_json::from_slice::<AnthropicMessagesResponse>(body)
                .map(|r| r.first_text().map(str::to_string)),
        };

        text.map_err(|e| InferenceError::MalformedResponse(e.to_string()))
    }
}

fn strip_inference_profile(model_id: &str) -> &str {
    ["us.", "eu.", "apac.", "global."]
        .iter()
        .find_map(|prefix| model_id.strip_prefix(prefix))
        .unwrap_or(model_id)
}

/// Sampling parameters sent with every invocation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
}

impl GenerationParams {
    /// Parameters used by the synchronous `/convert` route
    pub fn direct() -> Self {
        Self {
            temperature: 0.7,
            top_p: Some(1.0),
            max_tokens: 500,
            stop_sequences: Vec::new(),
        }
    }

    /// Parameters used by the event handler's chat-style call
    pub fn chat() -> Self {
        Self {
            temperature: 0.7,
            top_p: None,
            max_tokens: 1024,
            stop_sequences: Vec::new(),
        }
    }
}

/// Runs single prompt completions against a [`ModelInvoker`]
#[derive(Clone)]
pub struct InferenceService {
    invoker: Arc<dyn ModelInvoker>,
    print_prompts: bool,
}

impl InferenceService {
    pub fn new(invoker: Arc<dyn ModelInvoker>) -> Self {
        Self {
            invoker,
            print_prompts: false,
        }
    }

    /// Log every prompt at info level
    pub fn with_print_prompts(mut self, print_prompts: bool) -> Self {
        self.print_prompts = print_prompts;
        self
    }

    pub fn health_check(&self) -> bool {
        self.invoker.health_check()
    }

    /// Run one completion and return the generated text.
    ///
    /// Returns `Ok(None)` when the provider answered without text at the
    /// expected path. No retries.
    pub async fn complete(
        &self,
        model_id: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Option<String>, InferenceError> {
        let provider = ModelProvider::from_model_id(model_id)?;
        let body = provider.request_body(prompt, params)?;

        if self.print_prompts {
            tracing::info!(model_id = %model_id, prompt = %prompt, "Prompt");
        }

        let response = self.invoker.invoke_model(model_id, body).await?;
        let text = provider.response_text(&response)?;

        match &text {
            Some(text) if self.print_prompts => {
                tracing::info!(model_id = %model_id, reply = %text, "Model reply")
            }
            Some(text) => tracing::debug!(
                model_id = %model_id,
                preview = %log_preview(text, 80),
                "Model replied"
            ),
            None => tracing::warn!(
                model_id = %model_id,
                response = %truncate_with_suffix(&String::from_utf8_lossy(&response), 500, "..."),
                "Model response carried no text"
            ),
        }

        Ok(text)
    }
}

/// Errors raised while running a completion
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// No calling convention is known for this model id
    #[error("Unsupported model_id: {0}")]
    UnsupportedModel(String),

    #[error(transparent)]
    Bedrock(#[from] BedrockError),

    #[error("Failed to serialize model request: {0}")]
    Serialization(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}
