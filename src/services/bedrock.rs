//! Bedrock service for AWS Bedrock API interactions
//!
//! This module handles the raw `InvokeModel` call. Request body shapes and
//! response envelopes are provider specific and live in
//! [`crate::services::inference`]; this layer only moves bytes.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::{
    operation::invoke_model::InvokeModelError, primitives::Blob, Client as BedrockRuntimeClient,
};
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A collaborator able to run one model invocation.
///
/// Implemented by [`BedrockService`] in production and by substitutes in tests.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Send a JSON request body to the given model and return the raw JSON
    /// response body.
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, BedrockError>;

    /// Whether the invoker is usable
    fn health_check(&self) -> bool {
        true
    }
}

/// Service for interacting with AWS Bedrock Runtime.
#[derive(Clone)]
pub struct BedrockService {
    /// AWS Bedrock Runtime SDK client
    client: BedrockRuntimeClient,
}

impl BedrockService {
    /// Create a new Bedrock service.
    pub fn new(client: BedrockRuntimeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelInvoker for BedrockService {
    async fn invoke_model(&self, model_id: &str, body: Vec<u8>) -> Result<Vec<u8>, BedrockError> {
        tracing::debug!(
            model_id = %model_id,
            body_bytes = body.len(),
            "Calling Bedrock InvokeModel API"
        );

        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type(JSON_CONTENT_TYPE)
            .accept(JSON_CONTENT_TYPE)
            .body(Blob::new(body))
            .send()
            .await
            .map_err(BedrockError::from_invoke_model_error)?;

        let bytes = output.body.into_inner();

        tracing::debug!(
            model_id = %model_id,
            response_bytes = bytes.len(),
            "Bedrock InvokeModel API call completed"
        );

        Ok(bytes)
    }

    fn health_check(&self) -> bool {
        // There is no cheap health probe on Bedrock Runtime; connectivity
        // problems surface on the first invocation.
        true
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during Bedrock API calls
#[derive(Debug, thiserror::Error)]
pub enum BedrockError {
    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Throttling error (rate limited)
    #[error("Throttled: {0}")]
    Throttled(String),

    /// Validation error (invalid request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Service unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Access denied
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The model itself failed while generating
    #[error("Model error: {0}")]
    ModelError(String),

    /// Internal service error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Transport failure or unmodeled service error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl BedrockError {
    /// Create BedrockError from InvokeModel API error
    pub fn from_invoke_model_error<R>(err: SdkError<InvokeModelError, R>) -> Self
    where
        R: std::fmt::Debug,
    {
        match &err {
            SdkError::ServiceError(service_err) => match service_err.err() {
                InvokeModelError::ThrottlingException(e) => BedrockError::Throttled(
                    e.message().unwrap_or("Rate limited").to_string(),
                ),
                InvokeModelError::ValidationException(e) => BedrockError::ValidationError(
                    e.message().unwrap_or("Validation failed").to_string(),
                ),
                InvokeModelError::ModelNotReadyException(e) => BedrockError::ServiceUnavailable(
                    e.message().unwrap_or("Model not ready").to_string(),
                ),
                InvokeModelError::ModelTimeoutException(e) => BedrockError::ServiceUnavailable(
                    e.message().unwrap_or("Model timeout").to_string(),
                ),
                InvokeModelError::InternalServerException(e) => BedrockError::InternalError(
                    e.message().unwrap_or("Internal server error").to_string(),
                ),
                InvokeModelError::AccessDeniedException(e) => BedrockError::AccessDenied(
                    e.message().unwrap_or("Access denied").to_string(),
                ),
                InvokeModelError::ResourceNotFoundException(e) => BedrockError::ModelNotFound(
                    e.message().unwrap_or("Resource not found").to_string(),
                ),
                InvokeModelError::ModelErrorException(e) => BedrockError::ModelError(
                    e.message().unwrap_or("Model error").to_string(),
                ),
                other => BedrockError::Unknown(DisplayErrorContext(other).to_string()),
            },
            _ => BedrockError::Unknown(DisplayErrorContext(&err).to_string()),
        }
    }
}
