//! Synchronous conversion API types

use serde::{Deserialize, Serialize};

/// `POST /convert` request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertRequest {
    pub source_language: String,
    pub target_language: String,
    pub code: String,
}

/// `POST /convert` response body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvertResponse {
    pub converted_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_requires_string_fields() {
        let ok: Result<ConvertRequest, _> = serde_json::from_value(json!({
            "source_language": "python",
            "target_language": "go",
            "code": ""
        }));
        assert!(ok.is_ok());

        let wrong_type: Result<ConvertRequest, _> = serde_json::from_value(json!({
            "source_language": "python",
            "target_language": 3,
            "code": "print(1)"
        }));
        assert!(wrong_type.is_err());

        let missing: Result<ConvertRequest, _> = serde_json::from_value(json!({
            "source_language": "python",
            "code": "print(1)"
        }));
        assert!(missing.is_err());
    }
}
