//! Tool Registry - central registration and dispatch for all tools.
//!
//! Every transport lists and calls tools through the registry, so unknown
//! names, malformed arguments and handler panics are handled in one place.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::error::ToolError;
use super::handlers::ToolHandler;
use crate::core::ElasticClient;

use super::definitions::{
    AuthenticateTool, ClusterHealthTool, ClusterInfoTool, ClusterStatsTool, CountTool,
    CreateApiKeyTool, CreateIndexTool, DeleteDocumentTool, DeleteIndexTool, DeleteRoleTool,
    DeleteUserTool, EsqlTool, GetApiKeysTool, GetDocumentTool, GetIndexSettingsTool, GetIndexTool,
    GetMappingsTool, GetRolesTool, GetShardsTool, GetUsersTool, IndexDocumentTool, IndexStatsTool,
    InvalidateApiKeyTool, ListAliasesTool, ListIndicesTool, ListNodesTool, MultiSearchTool,
    NodesInfoTool, NodesStatsTool, PendingTasksTool, PutMappingTool, PutRoleTool, PutUserTool,
    RefreshIndexTool, SearchTool, UpdateAliasesTool, UpdateIndexSettingsTool,
};

type InvokeFn = fn(Arc<ElasticClient>, JsonObject) -> BoxFuture<'static, CallToolResult>;

/// A registered tool: its metadata and type-erased entry point.
struct ToolEntry {
    tool: Tool,
    invoke: InvokeFn,
}

fn entry<T: ToolHandler>() -> ToolEntry {
    ToolEntry {
        tool: T::to_tool(),
        invoke: T::invoke,
    }
}

/// Tool registry - owns the shared client and the tool catalogue.
pub struct ToolRegistry {
    client: Arc<ElasticClient>,
    entries: Vec<ToolEntry>,
}

impl ToolRegistry {
    /// Create a registry holding every Elasticsearch tool.
    pub fn new(client: Arc<ElasticClient>) -> Self {
        let entries = vec![
            // search & documents
            entry::<ListIndicesTool>(),
            entry::<GetMappingsTool>(),
            entry::<SearchTool>(),
            entry::<MultiSearchTool>(),
            entry::<CountTool>(),
            entry::<GetDocumentTool>(),
            entry::<IndexDocumentTool>(),
            entry::<DeleteDocumentTool>(),
            entry::<EsqlTool>(),
            entry::<GetShardsTool>(),
            // indices
            entry::<CreateIndexTool>(),
            entry::<DeleteIndexTool>(),
            entry::<GetIndexTool>(),
            entry::<GetIndexSettingsTool>(),
            entry::<UpdateIndexSettingsTool>(),
            entry::<PutMappingTool>(),
            entry::<RefreshIndexTool>(),
            entry::<IndexStatsTool>(),
            entry::<ListAliasesTool>(),
            entry::<UpdateAliasesTool>(),
            // cluster
            entry::<ClusterInfoTool>(),
            entry::<ClusterHealthTool>(),
            entry::<ClusterStatsTool>(),
            entry::<ListNodesTool>(),
            entry::<NodesInfoTool>(),
            entry::<NodesStatsTool>(),
            entry::<PendingTasksTool>(),
            // security
            entry::<AuthenticateTool>(),
            entry::<GetUsersTool>(),
            entry::<PutUserTool>(),
            entry::<DeleteUserTool>(),
            entry::<GetRolesTool>(),
            entry::<PutRoleTool>(),
            entry::<DeleteRoleTool>(),
            entry::<CreateApiKeyTool>(),
            entry::<GetApiKeysTool>(),
            entry::<InvalidateApiKeyTool>(),
        ];
        Self { client, entries }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.tool.name.as_ref()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool.clone()).collect()
    }

    /// Dispatch a tool call by name.
    ///
    /// Always yields a result: unknown tools, invalid arguments and panics
    /// inside a handler become error-flagged results.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let Some(entry) = self.entries.iter().find(|e| e.tool.name == name) else {
            let error = ToolError::not_found(name);
            warn!("{}", error);
            return CallToolResult::error(vec![Content::text(error.to_string())]);
        };

        debug!("Calling tool {}", name);
        let future = (entry.invoke)(self.client.clone(), arguments.unwrap_or_default());
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(result) => result,
            Err(_) => {
                let error = ToolError::panicked(name);
                error!("{}", error);
                CallToolResult::error(vec![Content::text(error.to_string())])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ElasticsearchConfig;
    use crate::domains::tools::definitions::common::test_support::{is_error, text};
    use serde_json::json;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn registry_for(url: &str) -> ToolRegistry {
        let config = ElasticsearchConfig::new(url).with_api_key("dGVzdDp0ZXN0");
        ToolRegistry::new(Arc::new(ElasticClient::new(&config).unwrap()))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = registry_for("http://localhost:9200");
        let names = registry.tool_names();
        assert_eq!(names.len(), 37);
        for expected in [
            "list_indices",
            "get_mappings",
            "search",
            "esql_query",
            "get_shards",
            "create_index",
            "update_aliases",
            "cluster_health",
            "list_nodes",
            "authenticate",
            "create_api_key",
            "invalidate_api_key",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_tool_names_are_unique() {
        let registry = registry_for("http://localhost:9200");
        let names = registry.tool_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_tools_have_object_schemas() {
        let registry = registry_for("http://localhost:9200");
        for tool in registry.tools() {
            assert!(tool.description.is_some(), "{} has no description", tool.name);
            assert_eq!(
                tool.input_schema.get("type"),
                Some(&json!("object")),
                "{} schema is not an object",
                tool.name
            );
        }
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry = registry_for("http://localhost:9200");
        let result = registry.call_tool("drop_cluster", None).await;
        assert!(is_error(&result));
        assert_eq!(text(&result), "Unknown tool: drop_cluster");
    }

    #[tokio::test]
    async fn test_call_with_invalid_arguments() {
        let server = MockServer::start().await;
        let registry = registry_for(&server.uri());

        let arguments = json!({"index": 42}).as_object().cloned();
        let result = registry.call_tool("get_mappings", arguments).await;
        assert!(is_error(&result));
        assert!(text(&result).starts_with("Invalid arguments for get_mappings:"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    fn panicking_invoke(
        _client: Arc<ElasticClient>,
        _arguments: JsonObject,
    ) -> BoxFuture<'static, CallToolResult> {
        async { None::<CallToolResult>.expect("handler bug") }.boxed()
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_error_result() {
        let mut registry = registry_for("http://localhost:9200");
        for entry in registry.entries.iter_mut() {
            if entry.tool.name == "list_indices" {
                entry.invoke = panicking_invoke;
            }
        }

        let result = registry.call_tool("list_indices", None).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "Tool list_indices failed unexpectedly");

        // the registry keeps serving after a panic
        let result = registry.call_tool("drop_cluster", None).await;
        assert_eq!(text(&result), "Unknown tool: drop_cluster");
    }

    #[tokio::test]
    async fn test_call_dispatches_to_handler() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_cluster/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cluster_name": "docker-cluster", "status": "green"
            })))
            .mount(&server)
            .await;

        let registry = registry_for(&server.uri());
        let result = registry.call_tool("cluster_health", None).await;
        assert!(!is_error(&result));
        assert!(text(&result).contains("green"));
    }
}
