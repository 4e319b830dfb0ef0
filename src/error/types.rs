//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::InferenceError;
use crate::storage::StorageError;

/// Errors of the synchronous `/convert` route.
///
/// Rendered as `{"detail": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Model response did not contain any generated text")]
    EmptyResponse,

}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) | ApiError::EmptyResponse => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorDetail {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[derive(Serialize)]
struct ErrorDetail {
    detail: String,
}

/// Errors of the event-driven conversion path.
///
/// Only [`ConversionError::MissingFields`] is client-fixable; every other
/// variant collapses to a 500 response.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Required request fields absent or blank
    #[error("Missing one or more required fields.")]
    MissingFields(Vec<String>),

    /// The event body could not be decoded
    #[error("Invalid event payload: {0}")]
    InvalidPayload(String),

    /// No calling convention for the configured model
    #[error("Unsupported model_id: {0}")]
    UnsupportedModel(String),

    /// The model replied without usable text
    #[error("Model response was empty.")]
    EmptyResponse,

    #[error(transparent)]
    Inference(InferenceError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<InferenceError> for ConversionError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::UnsupportedModel(model_id) => ConversionError::UnsupportedModel(model_id),
            other => ConversionError::Inference(other),
        }
    }
}

impl ConversionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConversionError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ConversionError::InvalidPayload(_)
            | ConversionError::UnsupportedModel(_)
            | ConversionError::EmptyResponse
            | ConversionError::Inference(_)
            | ConversionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller can fix the request and resend it
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
