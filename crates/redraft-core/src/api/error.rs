//! Error records for failed proxy calls.
//!
//! Every failure (network, non-2xx, unreadable body) is converted into an
//! [`ErrorRecord`] so the UI can show one inline reason and the full record
//! in an inspection panel.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The request never produced a response (connect failure, timeout).
    Transport,
    /// The proxy answered with a non-2xx status.
    Upstream,
    /// A 2xx response whose body was not the expected JSON.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Upstream => write!(f, "upstream"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured details of a failed call, shown verbatim in the error panel.
///
/// Fields the proxy returns beyond the well-known ones are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(
        rename = "statusText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ErrorRecord {
    /// Builds a record from a non-2xx response.
    ///
    /// A JSON object body is merged over `{status, statusText}` (body fields
    /// win). Anything else yields a synthesized record.
    pub fn from_response(status: u16, status_text: Option<&str>, body: &str) -> Self {
        let status_text = status_text.map(str::to_string);
        let Ok(Value::Object(mut map)) = serde_json::from_str::<Value>(body) else {
            return Self {
                status: Some(status),
                status_text,
                message: Some(Value::String(format!("HTTP error! status: {status}"))),
                ..Self::default()
            };
        };

        // A body value that does not fit the typed field stays in `extra`
        // and replaces the response value, as any other body field would.
        let status = match map.get("status") {
            None => Some(status),
            Some(v) => match v.as_u64().and_then(|v| u16::try_from(v).ok()) {
                Some(body_status) => {
                    map.remove("status");
                    Some(body_status)
                }
                None => None,
            },
        };
        let status_text = match map.get("statusText") {
            None => status_text,
            Some(Value::String(_)) => map
                .remove("statusText")
                .and_then(|v| v.as_str().map(str::to_string)),
            Some(_) => None,
        };

        Self {
            status,
            status_text,
            error: map.remove("error"),
            message: map.remove("message"),
            details: map.remove("details"),
            extra: map,
        }
    }

    /// Builds a record for a failure that has a name and a message but no
    /// usable response.
    pub fn named(name: &str, message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            status,
            error: Some(Value::String(name.to_string())),
            message: Some(Value::String(message.into())),
            ..Self::default()
        }
    }

    /// The most specific human-readable reason: `error`, then `message`,
    /// then `HTTP <status>`.
    pub fn reason(&self) -> String {
        value_text(self.error.as_ref())
            .or_else(|| value_text(self.message.as_ref()))
            .unwrap_or_else(|| match self.status {
                Some(status) => format!("HTTP {status}"),
                None => "Unknown error".to_string(),
            })
    }

    /// Pretty JSON for the inspection panel.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Extracts display text from a JSON value, treating empty strings as absent.
fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| Some(Value::Object(obj.clone()).to_string())),
        other => Some(other.to_string()),
    }
}

/// A failed proxy call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub record: ErrorRecord,
}

impl ApiError {
    pub fn upstream(status: u16, status_text: Option<&str>, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::Upstream,
            record: ErrorRecord::from_response(status, status_text, body),
        }
    }

    pub fn parse(status: u16, err: &serde_json::Error) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            record: ErrorRecord::named(
                "ParseError",
                format!("Invalid JSON in response: {err}"),
                Some(status),
            ),
        }
    }

    pub fn transport(err: &reqwest::Error) -> Self {
        let (name, message) = if err.is_timeout() {
            ("TimeoutError", format!("Request timed out: {err}"))
        } else if err.is_connect() {
            ("ConnectionError", format!("Connection failed: {err}"))
        } else {
            ("NetworkError", format!("Network error: {err}"))
        };
        Self {
            kind: ApiErrorKind::Transport,
            record: ErrorRecord::named(name, message, None),
        }
    }

    /// Reason shown inline as `Error: <reason>`.
    ///
    /// Upstream failures prefer the proxy's `error` field; local failures
    /// show their message, not their name.
    pub fn reason(&self) -> String {
        match self.kind {
            ApiErrorKind::Upstream => self.record.reason(),
            ApiErrorKind::Transport | ApiErrorKind::Parse => {
                value_text(self.record.message.as_ref()).unwrap_or_else(|| self.record.reason())
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_body_is_merged_over_status() {
        let record = ErrorRecord::from_response(
            500,
            Some("Internal Server Error"),
            r#"{"error":"DeepL API error","details":"quota exceeded","status":456}"#,
        );
        assert_eq!(record.status, Some(456));
        assert_eq!(record.status_text.as_deref(), Some("Internal Server Error"));
        assert_eq!(record.reason(), "DeepL API error");
        assert_eq!(record.details, Some(json!("quota exceeded")));
    }

    #[test]
    fn test_untyped_status_fields_are_kept_verbatim() {
        let record = ErrorRecord::from_response(
            500,
            Some("Internal Server Error"),
            r#"{"error":"boom","status":"degraded","statusText":{"code":7}}"#,
        );
        assert_eq!(record.status, None);
        assert_eq!(record.status_text, None);
        assert_eq!(record.extra.get("status"), Some(&json!("degraded")));
        assert_eq!(record.extra.get("statusText"), Some(&json!({"code": 7})));

        let json: Value = serde_json::from_str(&record.to_pretty_json()).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["statusText"], json!({"code": 7}));
    }

    #[test]
    fn test_non_json_body_is_synthesized() {
        let record = ErrorRecord::from_response(502, Some("Bad Gateway"), "<html>oops</html>");
        assert_eq!(record.status, Some(502));
        assert_eq!(record.reason(), "HTTP error! status: 502");
        assert!(record.error.is_none());
    }

    #[test]
    fn test_reason_falls_back_to_status() {
        let record = ErrorRecord::from_response(418, None, r#"{"error":""}"#);
        assert_eq!(record.reason(), "HTTP 418");
    }

    #[test]
    fn test_nested_error_object_uses_its_message() {
        let record =
            ErrorRecord::from_response(400, None, r#"{"error":{"message":"bad lang"},"x":1}"#);
        assert_eq!(record.reason(), "bad lang");
        assert_eq!(record.extra.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_pretty_json_uses_wire_names() {
        let record = ErrorRecord::from_response(500, Some("Internal Server Error"), "{}");
        let json = record.to_pretty_json();
        assert!(json.contains(r#""status": 500"#));
        assert!(json.contains(r#""statusText": "Internal Server Error""#));
    }

    #[test]
    fn test_parse_error_reason_is_message() {
        let err = serde_json::from_str::<Value>("nope").unwrap_err();
        let api = ApiError::parse(200, &err);
        assert_eq!(api.kind, ApiErrorKind::Parse);
        assert!(api.reason().starts_with("Invalid JSON in response"));
    }
}
