//! Request building blocks: query strings, bodies and path segments.

use serde_json::Value;

/// Ordered query parameters, stringified on insertion.
///
/// Pairs are emitted in insertion order with no deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Append a pair only when a value is present.
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Percent-encoded `key=value&...` form.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.0)
    }
}

/// Shorthand for the `format=json` query used by the `_cat` APIs.
pub fn cat_query() -> Query {
    Query::new().with("format", "json")
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Serialized as JSON text.
    Json(Value),
    /// Newline-delimited JSON, sent verbatim.
    NdJson(String),
}

impl Body {
    pub(crate) fn into_text(self) -> Result<String, serde_json::Error> {
        match self {
            Self::Json(value) => serde_json::to_string(&value),
            Self::NdJson(text) => Ok(text),
        }
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Percent-encode a user-supplied value as a single path segment.
pub fn encode_segment(segment: &str) -> String {
    // byte_serialize escapes a literal '+', so any '+' left came from a space
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_encoding_preserves_order() {
        let query = Query::new().with("format", "json").with("h", "index,health");
        assert_eq!(query.encode().unwrap(), "format=json&h=index%2Chealth");
    }

    #[test]
    fn test_query_stringifies_values() {
        let query = Query::new()
            .with("size", 10)
            .with("refresh", true)
            .with_opt("from", None::<u32>)
            .with_opt("q", Some("a b"));
        assert_eq!(query.encode().unwrap(), "size=10&refresh=true&q=a+b");
    }

    #[test]
    fn test_query_keeps_duplicates() {
        let query = Query::new().with("s", "index").with("s", "health");
        assert_eq!(query.encode().unwrap(), "s=index&s=health");
    }

    #[test]
    fn test_body_text() {
        let input = json!({"query": {"match": {"title": "rust"}}, "size": 3});
        let text = Body::from(input.clone()).into_text().unwrap();
        let decoded: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, input);

        let nd = "{}\n{\"query\":{}}\n".to_string();
        assert_eq!(Body::NdJson(nd.clone()).into_text().unwrap(), nd);
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("logs-2024"), "logs-2024");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("my doc"), "my%20doc");
        assert_eq!(encode_segment("a+b"), "a%2Bb");
        assert_eq!(encode_segment("logs-*,metrics-*"), "logs-*%2Cmetrics-*");
    }
}
