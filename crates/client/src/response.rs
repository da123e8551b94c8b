//! Response normalization.
//!
//! The API answers either with an envelope (`{"data": ..., "message": ...}`)
//! or with a bare body. Both are folded into [`ApiResponse`] so callers always
//! see `{status, data, message}`.

use serde::Serialize;
use serde_json::Value;

/// Normalized API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl ApiResponse<Value> {
    /// Fold a decoded body into the normalized shape.
    ///
    /// - An object with a `data` key is an envelope: `data` and `message`
    ///   (or `error`) are lifted out.
    /// - Any other successful body becomes `data` as-is.
    /// - Any other failed body only contributes a message.
    pub fn normalize(status: u16, body: Value) -> Self {
        let success = (200..300).contains(&status);
        match body {
            Value::Null => Self {
                status,
                data: None,
                message: None,
            },
            Value::Object(mut map) if map.contains_key("data") => {
                let message = take_message(&mut map);
                let data = map.remove("data").filter(|d| !d.is_null());
                Self {
                    status,
                    data,
                    message,
                }
            }
            Value::Object(mut map) if !success => Self {
                status,
                data: None,
                message: take_message(&mut map),
            },
            Value::String(text) if !success => Self {
                status,
                data: None,
                message: Some(text).filter(|t| !t.trim().is_empty()),
            },
            other if success => Self {
                status,
                data: Some(other),
                message: None,
            },
            _ => Self {
                status,
                data: None,
                message: None,
            },
        }
    }
}

fn take_message(map: &mut serde_json::Map<String, Value>) -> Option<String> {
    ["message", "error"].iter().find_map(|key| match map.remove(*key) {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_is_unwrapped() {
        let res = ApiResponse::normalize(200, json!({"data": {"id": 1}, "message": "ok"}));
        assert_eq!(res.data, Some(json!({"id": 1})));
        assert_eq!(res.message.as_deref(), Some("ok"));
        assert!(res.is_success());
    }

    #[test]
    fn bare_success_body_becomes_data() {
        let res = ApiResponse::normalize(200, json!([1, 2, 3]));
        assert_eq!(res.data, Some(json!([1, 2, 3])));
        assert_eq!(res.message, None);
    }

    #[test]
    fn error_body_yields_message_only() {
        let res = ApiResponse::normalize(400, json!({"error": "bad price", "code": "VALIDATION"}));
        assert_eq!(res.data, None);
        assert_eq!(res.message.as_deref(), Some("bad price"));
        assert!(!res.is_success());

        let text = ApiResponse::normalize(502, json!("Bad Gateway"));
        assert_eq!(text.message.as_deref(), Some("Bad Gateway"));
    }

    #[test]
    fn null_data_is_none() {
        let res = ApiResponse::normalize(204, Value::Null);
        assert_eq!(res.data, None);
        let res = ApiResponse::normalize(200, json!({"data": null, "message": "deleted"}));
        assert_eq!(res.data, None);
        assert_eq!(res.message.as_deref(), Some("deleted"));
    }
}
