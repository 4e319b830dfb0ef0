//! Synchronous conversion endpoint
//!
//! `POST /convert` builds one prompt, calls the model once and returns the
//! trimmed reply. Nothing is persisted.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::ApiError;
use crate::schemas::{ConvertRequest, ConvertResponse};
use crate::server::state::AppState;
use crate::services::{direct_translation_prompt, GenerationParams};

/// POST /convert
pub async fn convert_code(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    let model_id = &state.settings.convert_model_id;
    let prompt = direct_translation_prompt(
        &request.source_language,
        &request.target_language,
        &request.code,
    );

    let reply = state
        .inference
        .complete(model_id, &prompt, &GenerationParams::direct())
        .await
        .map_err(|e| {
            tracing::error!(model_id = %model_id, error = %e, "Conversion failed");
            ApiError::from(e)
        })?
        .ok_or_else(|| {
            tracing::error!(model_id = %model_id, "Model returned no text");
            ApiError::EmptyResponse
        })?;

    tracing::info!(
        model_id = %model_id,
        source_language = %request.source_language,
        target_language = %request.target_language,
        code_chars = request.code.chars().count(),
        "Converted code"
    );

    Ok(Json(ConvertResponse {
        converted_code: reply.trim().to_string(),
    }))
}
