//! Response body parsing.
//!
//! Pure functions that turn raw response bodies into typed values, kept
//! apart from the transport so they can be tested without HTTP.

use orb_core::Validate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{OrbError, OrbResult};

/// Longest raw body quoted in an error message.
const MAX_DETAIL_LEN: usize = 512;

/// Parse a success body. An empty body decodes as `null`.
pub fn parse_body(text: &str) -> OrbResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| OrbError::InvalidResponse {
        message: format!("body is not JSON: {e}"),
    })
}

/// Extract a human-readable message from an error body.
///
/// Orb reports errors as `{"type", "title", "detail", "status"}`. Prefer
/// `detail`, then `title`, and fall back to the (truncated) raw body.
pub fn error_detail(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "title", "message"] {
            if let Some(Value::String(s)) = map.get(key) {
                return s.clone();
            }
        }
    }

    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_DETAIL_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Decode a response value, optionally validating it.
pub fn decode_response<T>(value: Value, validate: bool) -> OrbResult<T>
where
    T: DeserializeOwned + Validate,
{
    let decoded: T = serde_json::from_value(value).map_err(|e| OrbError::InvalidResponse {
        message: e.to_string(),
    })?;
    if validate {
        decoded.validate()?;
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::models::Subscription;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert_eq!(parse_body("  \n").unwrap(), Value::Null);
        assert_eq!(parse_body(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
        assert!(matches!(
            parse_body("<html>"),
            Err(OrbError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_error_detail_prefers_detail() {
        let body = r#"{"type": "https://docs.withorb.com/x", "title": "Bad", "detail": "plan_id is required", "status": 400}"#;
        assert_eq!(error_detail(body), "plan_id is required");
        assert_eq!(error_detail(r#"{"title": "Conflict"}"#), "Conflict");
    }

    #[test]
    fn test_error_detail_falls_back_to_body() {
        assert_eq!(error_detail("  gateway timeout "), "gateway timeout");

        let long = "x".repeat(MAX_DETAIL_LEN + 10);
        let detail = error_detail(&long);
        assert!(detail.ends_with("..."));
        assert_eq!(detail.len(), MAX_DETAIL_LEN + 3);
    }

    #[test]
    fn test_decode_response_validates_on_request() {
        let raw = json!({
            "id": "sub_1",
            "created_at": "2024-01-01T00:00:00Z",
            "start_date": "2024-01-01T00:00:00Z",
            "status": "paused",
            "customer": {"id": "cus_1"},
            "net_terms": 0,
            "billing_cycle_day": 1
        });

        let lenient: Subscription = decode_response(raw.clone(), false).unwrap();
        assert!(!lenient.status.is_known());

        let strict = decode_response::<Subscription>(raw, true);
        assert!(matches!(strict, Err(OrbError::Validation(_))));
    }

    #[test]
    fn test_decode_response_shape_mismatch() {
        let result = decode_response::<Subscription>(json!({"id": 5}), false);
        assert!(matches!(result, Err(OrbError::InvalidResponse { .. })));
    }
}
