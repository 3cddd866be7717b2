//! Get mappings tool.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, index_path, structured_result};

/// Parameters for the get mappings tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetMappingsParams {
    /// Index name or pattern to read mappings from.
    pub index: String,
}

/// Get field mappings for an index.
pub struct GetMappingsTool;

#[async_trait::async_trait]
impl ToolHandler for GetMappingsTool {
    const NAME: &'static str = "get_mappings";
    const DESCRIPTION: &'static str = "Get the field mappings of an Elasticsearch index, showing each field's type and indexing options.";

    type Params = GetMappingsParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: GetMappingsParams) -> CallToolResult {
        info!("Getting mappings");

        match client.get(&index_path(&params.index, "/_mapping"), None).await.into_result() {
            Ok(data) => structured_result(format!("Mappings for '{}'", params.index), data),
            Err(failure) => error_result(
                &format!("Failed to get mappings for '{}'", params.index),
                &failure,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::{client, is_error, text};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_mappings() {
        let server = MockServer::start().await;
        let mappings = json!({"books": {"mappings": {"properties": {"title": {"type": "text"}}}}});
        Mock::given(method("GET"))
            .and(path("/books/_mapping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&mappings))
            .mount(&server)
            .await;

        let params = GetMappingsParams { index: "books".into() };
        let result = GetMappingsTool::execute(&client(&server), params).await;
        assert!(!is_error(&result));
        assert_eq!(result.structured_content, Some(mappings));
    }

    #[tokio::test]
    async fn test_get_mappings_missing_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"type": "index_not_found_exception", "reason": "no such index [nope]"}
            })))
            .mount(&server)
            .await;

        let params = GetMappingsParams { index: "nope".into() };
        let result = GetMappingsTool::execute(&client(&server), params).await;
        assert!(is_error(&result));
        assert_eq!(
            text(&result),
            "Failed to get mappings for 'nope': [index_not_found_exception] no such index [nope] (HTTP 404)"
        );
    }
}
