//! Helpers for the upstream response envelope.
//!
//! Shopee responses are JSON objects that either carry a non-empty `error`
//! field (with a human-readable `message`) on failure, or the payload —
//! directly at the root or nested under a `response` field — on success.
//! Successful responses often still include `"error": ""`, so only a
//! non-empty value counts as a failure.

use serde_json::Value;

/// Extracts the upstream error code and message, if the response reports one.
///
/// Returns `None` for missing or empty `error` fields.
pub(crate) fn extract_error(body: &Value) -> Option<(String, String)> {
    let code = body.get("error")?.as_str()?;
    if code.is_empty() {
        return None;
    }
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some((code.to_string(), message))
}

/// Unwraps the `response` envelope if present, otherwise returns the body
/// unchanged.
pub(crate) fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => map
            .remove("response")
            .unwrap_or_else(|| Value::Object(map)),
        other => other,
    }
}

/// Reads a string field, checking the `response` envelope before the root.
///
/// Token endpoints have been observed returning their fields in either
/// position, so both are accepted.
pub(crate) fn string_field(body: &Value, name: &str) -> Option<String> {
    body.get("response")
        .and_then(|r| r.get(name))
        .or_else(|| body.get(name))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Reads an integer field, checking the `response` envelope before the root.
pub(crate) fn int_field(body: &Value, name: &str) -> Option<i64> {
    body.get("response")
        .and_then(|r| r.get(name))
        .or_else(|| body.get(name))
        .and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_error_reads_code_and_message() {
        let body = json!({"error": "error_param", "message": "bad cursor"});
        assert_eq!(
            extract_error(&body),
            Some(("error_param".to_string(), "bad cursor".to_string()))
        );
    }

    #[test]
    fn test_extract_error_ignores_empty_error() {
        // Successful responses carry "error": ""
        let body = json!({"error": "", "response": {"order_list": []}});
        assert_eq!(extract_error(&body), None);
    }

    #[test]
    fn test_extract_error_ignores_missing_error() {
        let body = json!({"access_token": "a"});
        assert_eq!(extract_error(&body), None);
    }

    #[test]
    fn test_extract_error_defaults_message_to_empty() {
        let body = json!({"error": "error_auth"});
        assert_eq!(
            extract_error(&body),
            Some(("error_auth".to_string(), String::new()))
        );
    }

    #[test]
    fn test_unwrap_envelope_prefers_response_field() {
        let body = json!({"error": "", "response": {"order_list": [1, 2]}});
        assert_eq!(unwrap_envelope(body), json!({"order_list": [1, 2]}));
    }

    #[test]
    fn test_unwrap_envelope_falls_back_to_root() {
        let body = json!({"order_list": []});
        assert_eq!(unwrap_envelope(body), json!({"order_list": []}));
    }

    #[test]
    fn test_string_field_checks_envelope_first() {
        let nested = json!({"response": {"access_token": "inner"}, "access_token": "outer"});
        assert_eq!(
            string_field(&nested, "access_token"),
            Some("inner".to_string())
        );

        let root = json!({"access_token": "outer"});
        assert_eq!(
            string_field(&root, "access_token"),
            Some("outer".to_string())
        );
    }

    #[test]
    fn test_int_field_reads_expire_in() {
        let body = json!({"expire_in": 14400});
        assert_eq!(int_field(&body, "expire_in"), Some(14_400));
        assert_eq!(int_field(&body, "missing"), None);
    }
}
