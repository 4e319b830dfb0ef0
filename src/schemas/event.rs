//! Event-driven conversion types
//!
//! Events arrive either as proxy-style envelopes (`httpMethod`, `body`,
//! `isBase64Encoded`, ...) or as the bare request body. Responses use the
//! proxy integration result shape: `statusCode`, `headers`, string `body`.

use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

use crate::error::ConversionError;

/// Static body returned to CORS preflight requests
pub const PREFLIGHT_MESSAGE: &str = "Preflight check OK";

/// Headers attached to every event response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "*"),
    ("Access-Control-Allow-Methods", "POST,OPTIONS"),
];

/// Wire names of the request fields, in reporting order
pub const REQUIRED_FIELDS: [&str; 4] = ["sourceCode", "sourceLang", "targetLang", "UserID"];

/// What an incoming event asks for
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    /// CORS preflight, answered without further processing
    Preflight,
    /// A conversion request body (a JSON object)
    Request(Map<String, Value>),
}

impl EventPayload {
    /// Classify and unwrap an incoming event
    pub fn parse(event: &Value) -> Result<Self, ConversionError> {
        if is_preflight(event) {
            return Ok(EventPayload::Preflight);
        }

        let body = match event.get("body") {
            Some(body) => decode_body(body, is_base64_encoded(event))?,
            None => event.clone(),
        };

        match body {
            Value::Object(fields) => Ok(EventPayload::Request(fields)),
            other => Err(ConversionError::InvalidPayload(format!(
                "expected a JSON object body, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn is_preflight(event: &Value) -> bool {
    let method = event
        .get("httpMethod")
        .or_else(|| event.pointer("/requestContext/http/method"))
        .and_then(Value::as_str);

    method.is_some_and(|m| m.eq_ignore_ascii_case("OPTIONS"))
}

fn is_base64_encoded(event: &Value) -> bool {
    event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn decode_body(body: &Value, base64_encoded: bool) -> Result<Value, ConversionError> {
    match body {
        Value::String(raw) => {
            let text = if base64_encoded {
                let bytes = STANDARD
                    .decode(raw.trim())
                    .map_err(|e| ConversionError::InvalidPayload(format!("invalid base64 body: {e}")))?;
                String::from_utf8(bytes)
                    .map_err(|e| ConversionError::InvalidPayload(format!("body is not UTF-8: {e}")))?
            } else {
                raw.clone()
            };

            serde_json::from_str(&text)
                .map_err(|e| ConversionError::InvalidPayload(format!("body is not valid JSON: {e}")))
        }
        Value::Object(_) => Ok(body.clone()),
        Value::Null => Err(ConversionError::InvalidPayload("event body is empty".to_string())),
        other => Err(ConversionError::InvalidPayload(format!(
            "unsupported body type {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A normalized event-path conversion request.
///
/// Language names are trimmed and lower-cased, the user id is trimmed and the
/// source code is kept verbatim. All four fields must be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ConversionRequest {
    #[validate(custom(function = "not_blank"))]
    pub source_code: String,
    #[validate(custom(function = "not_blank"))]
    pub source_language: String,
    #[validate(custom(function = "not_blank"))]
    pub target_language: String,
    #[validate(custom(function = "not_blank"))]
    pub user_id: String,
}

impl ConversionRequest {
    /// Read and validate the request fields of an event body.
    ///
    /// Absent, non-string and blank fields are all reported as missing.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ConversionError> {
        let request = Self {
            source_code: field_str(fields, "sourceCode").to_string(),
            source_language: field_str(fields, "sourceLang").trim().to_lowercase(),
            target_language: field_str(fields, "targetLang").trim().to_lowercase(),
            user_id: field_str(fields, "UserID").trim().to_string(),
        };

        if let Err(errors) = request.validate() {
            let invalid: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|field| wire_name(&field.to_string()).to_string())
                .collect();
            let missing = REQUIRED_FIELDS
                .iter()
                .filter(|name| invalid.iter().any(|f| f == *name))
                .map(|name| name.to_string())
                .collect();
            return Err(ConversionError::MissingFields(missing));
        }

        Ok(request)
    }
}

fn field_str<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a str {
    fields.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn wire_name(field: &str) -> &str {
    match field {
        "source_code" => "sourceCode",
        "source_language" => "sourceLang",
        "target_language" => "targetLang",
        "user_id" => "UserID",
        other => other,
    }
}

/// Successful event conversion body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConversionBody {
    pub converted_code: String,
    pub s3_key: String,
}

/// Proxy-integration style response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded response body
    pub body: String,
}

impl EventResponse {
    /// Build a response with the CORS headers and a JSON body
    pub fn json(status: StatusCode, body: &impl Serialize) -> Self {
        let mut headers: BTreeMap<String, String> = CORS_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let body = serde_json::to_string(body).unwrap_or_else(|_| "null".to_string());

        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    /// Answer to a CORS preflight
    pub fn preflight() -> Self {
        Self::json(StatusCode::OK, &PREFLIGHT_MESSAGE)
    }

    /// Successful conversion
    pub fn converted(converted_code: String, s3_key: String) -> Self {
        Self::json(
            StatusCode::OK,
            &EventConversionBody {
                converted_code,
                s3_key,
            },
        )
    }

    /// Failed conversion: `{message, missing_fields}` for client errors,
    /// `{message: "Internal error", error}` otherwise
    pub fn from_error(err: &ConversionError) -> Self {
        match err {
            ConversionError::MissingFields(missing) => Self::json(
                err.status_code(),
                &json!({
                    "message": err.to_string(),
                    "missing_fields": missing,
                }),
            ),
            _ => Self::json(
                err.status_code(),
                &json!({
                    "message": "Internal error",
                    "error": err.to_string(),
                }),
            ),
        }
    }

    /// Parse the body back as JSON
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

impl IntoResponse for EventResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        let headers = response.headers_mut();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }
        headers
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        response
    }
}
