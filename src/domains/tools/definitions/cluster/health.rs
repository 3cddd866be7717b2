//! Cluster-level monitoring tools: info, health, stats and pending tasks.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::{Query, encode_segment};
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, structured_result};

/// Parameters for tools that take no input.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Cluster name, version and build information from the root endpoint.
pub struct ClusterInfoTool;

#[async_trait::async_trait]
impl ToolHandler for ClusterInfoTool {
    const NAME: &'static str = "cluster_info";
    const DESCRIPTION: &'static str = "Get basic information about the cluster: name, UUID and Elasticsearch version.";

    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, _params: NoParams) -> CallToolResult {
        info!("Getting cluster info");

        match client.get("/", None).await.into_result() {
            Ok(response) => {
                let summary = format!(
                    "Cluster '{}' running Elasticsearch {}",
                    response["cluster_name"].as_str().unwrap_or("unknown"),
                    response["version"]["number"].as_str().unwrap_or("unknown")
                );
                structured_result(summary, response)
            }
            Err(failure) => error_result("Failed to get cluster info", &failure),
        }
    }
}

/// Parameters for the cluster health tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ClusterHealthParams {
    /// Restrict health to one index or pattern.
    #[serde(default)]
    pub index: Option<String>,

    /// Detail level: `cluster`, `indices` or `shards`.
    #[serde(default)]
    pub level: Option<String>,
}

/// Cluster health.
pub struct ClusterHealthTool;

#[async_trait::async_trait]
impl ToolHandler for ClusterHealthTool {
    const NAME: &'static str = "cluster_health";
    const DESCRIPTION: &'static str = "Get cluster health status (green, yellow, red) with node, shard and pending task counts. Optionally scoped to an index.";

    type Params = ClusterHealthParams;

    #[instrument(skip_all, fields(index = ?params.index))]
    async fn execute(client: &ElasticClient, params: ClusterHealthParams) -> CallToolResult {
        info!("Getting cluster health");

        let path = match &params.index {
            Some(index) => format!("/_cluster/health/{}", encode_segment(index)),
            None => "/_cluster/health".to_string(),
        };
        let query = Query::new().with_opt("level", params.level.as_deref());
        match client.get(&path, Some(&query)).await.into_result() {
            Ok(response) => {
                let summary = format!(
                    "Cluster '{}' is {}",
                    response["cluster_name"].as_str().unwrap_or("unknown"),
                    response["status"].as_str().unwrap_or("unknown")
                );
                structured_result(summary, response)
            }
            Err(failure) => error_result("Failed to get cluster health", &failure),
        }
    }
}

/// Cluster-wide statistics.
pub struct ClusterStatsTool;

#[async_trait::async_trait]
impl ToolHandler for ClusterStatsTool {
    const NAME: &'static str = "cluster_stats";
    const DESCRIPTION: &'static str = "Get cluster-wide statistics: index and document counts, store size, node roles, JVM and OS usage.";

    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, _params: NoParams) -> CallToolResult {
        info!("Getting cluster stats");

        match client.get("/_cluster/stats", None).await.into_result() {
            Ok(response) => {
                let shaped = json!({
                    "cluster_name": response["cluster_name"],
                    "status": response["status"],
                    "indices": {
                        "count": response["indices"]["count"],
                        "docs": response["indices"]["docs"],
                        "store": response["indices"]["store"],
                        "shards": response["indices"]["shards"]["total"],
                    },
                    "nodes": {
                        "count": response["nodes"]["count"],
                        "versions": response["nodes"]["versions"],
                        "jvm": response["nodes"]["jvm"]["mem"],
                        "os": response["nodes"]["os"]["mem"],
                    },
                });
                structured_result(
                    format!(
                        "{} index(es) across {} node(s)",
                        response["indices"]["count"],
                        response["nodes"]["count"]["total"]
                    ),
                    shaped,
                )
            }
            Err(failure) => error_result("Failed to get cluster stats", &failure),
        }
    }
}

/// Pending cluster-state tasks.
pub struct PendingTasksTool;

#[async_trait::async_trait]
impl ToolHandler for PendingTasksTool {
    const NAME: &'static str = "pending_tasks";
    const DESCRIPTION: &'static str = "List cluster-level changes that have not yet been executed, such as index creation or mapping updates.";

    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, _params: NoParams) -> CallToolResult {
        info!("Getting pending tasks");

        match client.get("/_cluster/pending_tasks", None).await.into_result() {
            Ok(response) => {
                let count = response["tasks"].as_array().map(Vec::len).unwrap_or(0);
                structured_result(format!("{} pending task(s)", count), response)
            }
            Err(failure) => error_result("Failed to get pending tasks", &failure),
        }
    }
}
