//! Index lifecycle tools: create, delete, inspect, refresh and stats.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use crate::core::ElasticClient;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, index_path, object_len, structured_result};

/// Parameters naming a single index or pattern.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IndexParams {
    /// Index name or pattern.
    pub index: String,
}

/// Parameters for the create index tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateIndexParams {
    /// Name of the index to create.
    pub index: String,

    /// Index settings, e.g. `{"number_of_shards": 1, "number_of_replicas": 0}`.
    #[serde(default)]
    pub settings: Option<Map<String, Value>>,

    /// Mappings, e.g. `{"properties": {"title": {"type": "text"}}}`.
    #[serde(default)]
    pub mappings: Option<Map<String, Value>>,

    /// Aliases to attach, e.g. `{"books-current": {}}`.
    #[serde(default)]
    pub aliases: Option<Map<String, Value>>,
}

impl CreateIndexParams {
    /// Request body, or `None` when nothing was supplied.
    fn body(&self) -> Option<Value> {
        let mut body = Map::new();
        for (key, section) in [
            ("settings", &self.settings),
            ("mappings", &self.mappings),
            ("aliases", &self.aliases),
        ] {
            if let Some(section) = section {
                body.insert(key.to_string(), Value::Object(section.clone()));
            }
        }
        (!body.is_empty()).then_some(Value::Object(body))
    }
}

/// Create an index.
pub struct CreateIndexTool;

#[async_trait::async_trait]
impl ToolHandler for CreateIndexTool {
    const NAME: &'static str = "create_index";
    const DESCRIPTION: &'static str = "Create a new index with optional settings, mappings and aliases.";

    type Params = CreateIndexParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: CreateIndexParams) -> CallToolResult {
        info!("Creating index");

        let body = params.body().map(Into::into);
        match client.put(&index_path(&params.index, ""), body, None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Index '{}' created", params.index), response)
            }
            Err(failure) => error_result(
                &format!("Failed to create index '{}'", params.index),
                &failure,
            ),
        }
    }
}

/// Delete an index.
pub struct DeleteIndexTool;

#[async_trait::async_trait]
impl ToolHandler for DeleteIndexTool {
    const NAME: &'static str = "delete_index";
    const DESCRIPTION: &'static str = "Delete an index and all of its documents. This cannot be undone.";

    type Params = IndexParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: IndexParams) -> CallToolResult {
        warn!("Deleting index '{}'", params.index);

        match client.delete(&index_path(&params.index, ""), None, None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Index '{}' deleted", params.index), response)
            }
            Err(failure) => error_result(
                &format!("Failed to delete index '{}'", params.index),
                &failure,
            ),
        }
    }
}

/// Get an index definition.
pub struct GetIndexTool;

#[async_trait::async_trait]
impl ToolHandler for GetIndexTool {
    const NAME: &'static str = "get_index";
    const DESCRIPTION: &'static str = "Get the full definition of one or more indices: aliases, mappings and settings.";

    type Params = IndexParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: IndexParams) -> CallToolResult {
        info!("Getting index");

        match client.get(&index_path(&params.index, ""), None).await.into_result() {
            Ok(response) => structured_result(
                format!("{} index definition(s) for '{}'", object_len(&response), params.index),
                response,
            ),
            Err(failure) => error_result(
                &format!("Failed to get index '{}'", params.index),
                &failure,
            ),
        }
    }
}

/// Refresh an index.
pub struct RefreshIndexTool;

#[async_trait::async_trait]
impl ToolHandler for RefreshIndexTool {
    const NAME: &'static str = "refresh_index";
    const DESCRIPTION: &'static str = "Refresh an index so recent writes become visible to search.";

    type Params = IndexParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: IndexParams) -> CallToolResult {
        info!("Refreshing index");

        let path = index_path(&params.index, "/_refresh");
        match client.post(&path, None, None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Index '{}' refreshed", params.index), response)
            }
            Err(failure) => error_result(
                &format!("Failed to refresh index '{}'", params.index),
                &failure,
            ),
        }
    }
}

/// Index statistics.
pub struct IndexStatsTool;

#[async_trait::async_trait]
impl ToolHandler for IndexStatsTool {
    const NAME: &'static str = "index_stats";
    const DESCRIPTION: &'static str = "Get document, store, indexing and search statistics for an index.";

    type Params = IndexParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: IndexParams) -> CallToolResult {
        info!("Getting index stats");

        let path = index_path(&params.index, "/_stats");
        match client.get(&path, None).await.into_result() {
            Ok(response) => {
                let primaries = &response["_all"]["primaries"];
                let shaped = json!({
                    "docs": primaries["docs"],
                    "store": primaries["store"],
                    "indices": response["indices"],
                });
                structured_result(format!("Statistics for '{}'", params.index), shaped)
            }
            Err(failure) => error_result(
                &format!("Failed to get stats for '{}'", params.index),
                &failure,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::{client, is_error, text};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_create_body() {
        let params: CreateIndexParams = serde_json::from_value(json!({
            "index": "books",
            "settings": {"number_of_shards": 1},
            "mappings": {"properties": {"title": {"type": "text"}}}
        }))
        .unwrap();
        assert_eq!(
            params.body(),
            Some(json!({
                "settings": {"number_of_shards": 1},
                "mappings": {"properties": {"title": {"type": "text"}}}
            }))
        );

        let bare: CreateIndexParams = serde_json::from_value(json!({"index": "books"})).unwrap();
        assert_eq!(bare.body(), None);
    }

    #[tokio::test]
    async fn test_create_index() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/books"))
            .and(body_json(json!({"settings": {"number_of_replicas": 0}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "acknowledged": true, "shards_acknowledged": true, "index": "books"
            })))
            .mount(&server)
            .await;

        let params: CreateIndexParams = serde_json::from_value(json!({
            "index": "books", "settings": {"number_of_replicas": 0}
        }))
        .unwrap();
        let result = CreateIndexTool::execute(&client(&server), params).await;
        assert!(text(&result).starts_with("Index 'books' created"));
    }

    #[tokio::test]
    async fn test_create_existing_index() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"type": "resource_already_exists_exception", "reason": "index [books/abc] already exists"}
            })))
            .mount(&server)
            .await;

        let params: CreateIndexParams = serde_json::from_value(json!({"index": "books"})).unwrap();
        let result = CreateIndexTool::execute(&client(&server), params).await;
        assert!(is_error(&result));
        assert!(text(&result).contains("[resource_already_exists_exception]"));
    }

    #[tokio::test]
    async fn test_delete_index() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/old-logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
            .expect(1)
            .mount(&server)
            .await;

        let params = IndexParams { index: "old-logs".into() };
        let result = DeleteIndexTool::execute(&client(&server), params).await;
        assert!(!is_error(&result));
    }

    #[tokio::test]
    async fn test_index_stats_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/books/_stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_all": {"primaries": {"docs": {"count": 5}, "store": {"size_in_bytes": 100}}},
                "indices": {"books": {}}
            })))
            .mount(&server)
            .await;

        let params = IndexParams { index: "books".into() };
        let result = IndexStatsTool::execute(&client(&server), params).await;
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["docs"]["count"], 5);
        assert_eq!(structured["store"]["size_in_bytes"], 100);
    }
}
