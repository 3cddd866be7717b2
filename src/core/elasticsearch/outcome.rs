//! Uniform result of every Elasticsearch request.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Key under which an undecodable response body is wrapped.
pub const RAW_BODY_KEY: &str = "raw";

/// Classification of a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request exceeded the configured timeout.
    Timeout,
    /// No HTTP response was obtained (DNS, refused, reset, ...).
    Connection,
    /// Failure status without a structured error descriptor in the body.
    Request,
    /// Failure status carrying `error.type`; the remote string is kept verbatim.
    Remote(String),
    /// Anything not classified above.
    Unknown,
}

impl ErrorKind {
    /// The tag reported to callers.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Timeout => "timeout",
            Self::Connection => "connection_error",
            Self::Request => "request_error",
            Self::Remote(kind) => kind,
            Self::Unknown => "unknown_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A failed request: what went wrong, why, and the HTTP status if one was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl Failure {
    pub fn new(kind: ErrorKind, reason: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            status,
        }
    }

    /// Build a failure from a non-success status and its decoded body.
    ///
    /// Kind and reason come from the body's `error.type` / `error.reason`
    /// when present, each falling back independently.
    pub fn from_status(status: u16, canonical_reason: Option<&str>, body: &Value) -> Self {
        let descriptor = body.get("error");
        let kind = descriptor
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
            .map(|t| ErrorKind::Remote(t.to_string()))
            .unwrap_or(ErrorKind::Request);
        let reason = descriptor
            .and_then(|e| e.get("reason"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| canonical_reason.unwrap_or("Unknown status").to_string());

        Self::new(kind, reason, Some(status))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.reason)?;
        if let Some(status) = self.status {
            write!(f, " (HTTP {})", status)?;
        }
        Ok(())
    }
}

/// Result of a single request: exactly one of success data or a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(Failure),
}

impl Outcome {
    pub fn failure(kind: ErrorKind, reason: impl Into<String>, status: Option<u16>) -> Self {
        Self::Failure(Failure::new(kind, reason, status))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_result(self) -> Result<Value, Failure> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// Decode a response body as JSON, wrapping undecodable text under [`RAW_BODY_KEY`].
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| {
        let mut wrapper = serde_json::Map::new();
        wrapper.insert(RAW_BODY_KEY.to_string(), Value::String(text.to_string()));
        Value::Object(wrapper)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_uses_remote_descriptor() {
        let body = json!({
            "error": {"type": "index_not_found_exception", "reason": "no such index"},
            "status": 404
        });
        let failure = Failure::from_status(404, Some("Not Found"), &body);
        assert_eq!(failure.kind.as_str(), "index_not_found_exception");
        assert_eq!(failure.reason, "no such index");
        assert_eq!(failure.status, Some(404));
    }

    #[test]
    fn test_failure_falls_back_to_status_line() {
        let failure = Failure::from_status(502, Some("Bad Gateway"), &json!({"raw": "<html>"}));
        assert_eq!(failure.kind, ErrorKind::Request);
        assert_eq!(failure.reason, "Bad Gateway");
        assert_eq!(failure.status, Some(502));

        // `error` as a plain string is not a structured descriptor
        let failure = Failure::from_status(404, Some("Not Found"), &json!({"error": "gone"}));
        assert_eq!(failure.kind, ErrorKind::Request);
        assert_eq!(failure.reason, "Not Found");
    }

    #[test]
    fn test_decode_body_fallback() {
        assert_eq!(decode_body(r#"{"a": 1}"#), json!({"a": 1}));
        assert_eq!(decode_body("not json"), json!({"raw": "not json"}));
        assert_eq!(decode_body(""), json!({"raw": ""}));
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::new(ErrorKind::Timeout, "Request timed out after 50ms", None);
        assert_eq!(failure.to_string(), "[timeout] Request timed out after 50ms");

        let failure = Failure::new(ErrorKind::Remote("security_exception".into()), "denied", Some(403));
        assert_eq!(failure.to_string(), "[security_exception] denied (HTTP 403)");
    }

    #[test]
    fn test_outcome_into_result() {
        assert_eq!(Outcome::Success(json!(1)).into_result(), Ok(json!(1)));
        let outcome = Outcome::failure(ErrorKind::Unknown, "boom", None);
        assert!(!outcome.is_success());
        assert_eq!(outcome.into_result().unwrap_err().kind, ErrorKind::Unknown);
    }
}
