//! Common utilities shared across Elasticsearch tools.
//!
//! Response formatting, error rendering and path helpers.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

use crate::core::elasticsearch::{Failure, encode_segment};

/// Render a failed request as an error-flagged result prefixed with `label`.
pub fn error_result(label: &str, failure: &Failure) -> CallToolResult {
    let message = format!("{}: {}", label, failure);
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message)])
}

/// Error-flagged result for parameter combinations the schema cannot express.
pub fn invalid_params_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Success result with a one-line summary followed by pretty-printed JSON.
///
/// Object payloads are also attached as structured content.
pub fn structured_result(summary: impl Into<String>, data: Value) -> CallToolResult {
    let pretty = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
    let mut result =
        CallToolResult::success(vec![Content::text(summary.into()), Content::text(pretty)]);
    if data.is_object() {
        result.structured_content = Some(data);
    }
    result
}

/// `/{index}{suffix}` with the index encoded as one path segment.
pub fn index_path(index: &str, suffix: &str) -> String {
    format!("/{}{}", encode_segment(index), suffix)
}

/// Number of entries in an array payload, 0 otherwise.
pub fn array_len(data: &Value) -> usize {
    data.as_array().map(Vec::len).unwrap_or(0)
}

/// Number of keys in an object payload, 0 otherwise.
pub fn object_len(data: &Value) -> usize {
    data.as_object().map(serde_json::Map::len).unwrap_or(0)
}

/// Read `hits.total`, which is either a number or `{"value": n}`.
pub fn total_hits(response: &Value) -> u64 {
    let total = &response["hits"]["total"];
    total
        .get("value")
        .and_then(Value::as_u64)
        .or_else(|| total.as_u64())
        .unwrap_or(0)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::elasticsearch::ErrorKind;
    use serde_json::json;
    use test_support::{is_error, text};

    #[test]
    fn test_error_result_prefixes_label() {
        let failure = Failure::new(
            ErrorKind::Remote("index_not_found_exception".into()),
            "no such index [logs]",
            Some(404),
        );
        let result = error_result("Search failed", &failure);
        assert!(is_error(&result));
        assert_eq!(
            text(&result),
            "Search failed: [index_not_found_exception] no such index [logs] (HTTP 404)"
        );
    }

    #[test]
    fn test_structured_result() {
        let result = structured_result("Found 1 index", json!({"a": 1}));
        assert!(!is_error(&result));
        assert!(text(&result).starts_with("Found 1 index\n"));
        assert_eq!(result.structured_content, Some(json!({"a": 1})));

        let result = structured_result("Found 0", json!([]));
        assert_eq!(result.structured_content, None);
    }

    #[test]
    fn test_index_path() {
        assert_eq!(index_path("logs", "/_search"), "/logs/_search");
        assert_eq!(index_path("my index", ""), "/my%20index");
    }

    #[test]
    fn test_total_hits() {
        assert_eq!(total_hits(&json!({"hits": {"total": {"value": 42}}})), 42);
        assert_eq!(total_hits(&json!({"hits": {"total": 7}})), 7);
        assert_eq!(total_hits(&json!({})), 0);
    }
}
