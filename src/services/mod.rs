//! Services module
//!
//! Contains business logic and external service integrations.

pub mod bedrock;
pub mod converter;
pub mod extractor;
pub mod inference;
pub mod prompt;

pub use bedrock::{BedrockError, BedrockService, ModelInvoker};
pub use converter::{ConversionOutcome, ConversionService};
pub use extractor::extract_code_block;
pub use inference::{GenerationParams, InferenceError, InferenceService, ModelProvider};
pub use prompt::{direct_translation_prompt, marked_translation_prompt};
