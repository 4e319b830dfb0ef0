//! Event-driven conversion endpoints
//!
//! [`handle_event`] is the event handler proper: it takes a proxy-style event
//! (or a bare request body) and always produces an [`EventResponse`], never an
//! error. Two HTTP surfaces feed it:
//!
//! - `POST|OPTIONS /api/convert` wraps the HTTP request into an event and
//!   renders the event response as a plain HTTP response.
//! - `POST /events` takes a raw event and returns the proxy result as JSON.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    Json,
};
use serde_json::{json, Map, Value};

use crate::error::ConversionError;
use crate::schemas::{ConversionRequest, EventPayload, EventResponse};
use crate::server::state::AppState;
use crate::services::ConversionService;

/// Handle one conversion event.
///
/// Preflight events are answered immediately. Missing fields produce a 400
/// without touching any collaborator; every other failure becomes a 500.
pub async fn handle_event(converter: &ConversionService, event: &Value) -> EventResponse {
    match process_event(converter, event).await {
        Ok(response) => response,
        Err(err) if err.is_client_error() => {
            tracing::warn!(error = %err, details = ?err, "Rejected conversion event");
            EventResponse::from_error(&err)
        }
        Err(err) => {
            tracing::error!(error = %err, model_id = %converter.model_id(), "Conversion event failed");
            EventResponse::from_error(&err)
        }
    }
}

async fn process_event(converter: &ConversionService, event: &Value) -> Result<EventResponse, ConversionError> {
    let fields = match EventPayload::parse(event)? {
        EventPayload::Preflight => {
            tracing::debug!("Answering CORS preflight");
            return Ok(EventResponse::preflight());
        }
        EventPayload::Request(fields) => fields,
    };

    let request = ConversionRequest::from_fields(&fields)?;

    tracing::info!(
        user_id = %request.user_id,
        source_language = %request.source_language,
        target_language = %request.target_language,
        code_chars = request.source_code.chars().count(),
        "Conversion event received"
    );

    let outcome = converter.convert(&request).await?;

    Ok(EventResponse::converted(
        outcome.record.converted_code,
        outcome.storage_key,
    ))
}

/// Wrap an HTTP request into a REST-style proxy event
pub fn http_event(method: &Method, headers: &HeaderMap, body: &[u8]) -> Value {
    let headers: Map<String, Value> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), Value::String(v.to_string())))
        })
        .collect();

    let body = if body.is_empty() {
        Value::Null
    } else {
        Value::String(String::from_utf8_lossy(body).into_owned())
    };

    json!({
        "httpMethod": method.as_str(),
        "headers": headers,
        "body": body,
        "isBase64Encoded": false,
    })
}

/// POST|OPTIONS /api/convert
pub async fn convert_event(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> EventResponse {
    let event = http_event(&method, &headers, &body);
    handle_event(&state.converter, &event).await
}

/// POST /events
///
/// An unparseable event still yields a proxy result.
pub async fn invoke_event(State(state): State<AppState>, body: Bytes) -> Json<EventResponse> {
    match serde_json::from_slice::<Value>(&body) {
        Ok(event) => Json(handle_event(&state.converter, &event).await),
        Err(e) => {
            let err = ConversionError::InvalidPayload(e.to_string());
            tracing::error!(error = %err, "Unreadable event");
            Json(EventResponse::from_error(&err))
        }
    }
}
