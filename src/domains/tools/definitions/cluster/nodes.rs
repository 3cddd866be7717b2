//! Node monitoring tools.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::{cat_query, encode_segment};
use crate::domains::tools::ToolHandler;

use super::super::common::{array_len, error_result, object_len, structured_result};
use super::health::NoParams;

/// Columns requested from `_cat/nodes`.
const NODE_COLUMNS: &str = "name,ip,node.role,master,heap.percent,ram.percent,cpu,load_1m,disk.used_percent";

/// Parameters selecting nodes.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NodeParams {
    /// Node id, name or selector (e.g. `_local`, `master:true`). All nodes when omitted.
    #[serde(default)]
    pub node_id: Option<String>,
}

impl NodeParams {
    fn path(&self, suffix: &str) -> String {
        match &self.node_id {
            Some(node) => format!("/_nodes/{}{}", encode_segment(node), suffix),
            None => format!("/_nodes{}", suffix),
        }
    }
}

/// Node overview via `_cat/nodes`.
pub struct ListNodesTool;

#[async_trait::async_trait]
impl ToolHandler for ListNodesTool {
    const NAME: &'static str = "list_nodes";
    const DESCRIPTION: &'static str = "List cluster nodes with roles, master flag, heap, RAM, CPU, load and disk usage.";

    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, _params: NoParams) -> CallToolResult {
        info!("Listing nodes");

        let query = cat_query().with("h", NODE_COLUMNS);
        match client.get("/_cat/nodes", Some(&query)).await.into_result() {
            Ok(data) => {
                let count = array_len(&data);
                structured_result(format!("Found {} node(s)", count), data)
            }
            Err(failure) => error_result("Failed to list nodes", &failure),
        }
    }
}

/// Static node information.
pub struct NodesInfoTool;

#[async_trait::async_trait]
impl ToolHandler for NodesInfoTool {
    const NAME: &'static str = "nodes_info";
    const DESCRIPTION: &'static str = "Get configuration and build information for cluster nodes: version, roles, JVM, OS, plugins and modules.";

    type Params = NodeParams;

    #[instrument(skip_all, fields(node = ?params.node_id))]
    async fn execute(client: &ElasticClient, params: NodeParams) -> CallToolResult {
        info!("Getting nodes info");

        match client.get(&params.path(""), None).await.into_result() {
            Ok(response) => {
                let count = object_len(&response["nodes"]);
                structured_result(format!("Info for {} node(s)", count), response)
            }
            Err(failure) => error_result("Failed to get nodes info", &failure),
        }
    }
}

/// Runtime node statistics.
pub struct NodesStatsTool;

#[async_trait::async_trait]
impl ToolHandler for NodesStatsTool {
    const NAME: &'static str = "nodes_stats";
    const DESCRIPTION: &'static str = "Get runtime statistics for cluster nodes: JVM heap, thread pools, file system, indexing and search counters.";

    type Params = NodeParams;

    #[instrument(skip_all, fields(node = ?params.node_id))]
    async fn execute(client: &ElasticClient, params: NodeParams) -> CallToolResult {
        info!("Getting nodes stats");

        match client.get(&params.path("/stats"), None).await.into_result() {
            Ok(response) => {
                let count = object_len(&response["nodes"]);
                structured_result(format!("Statistics for {} node(s)", count), response)
            }
            Err(failure) => error_result("Failed to get nodes stats", &failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::test_support::{client, text};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_node_paths() {
        assert_eq!(NodeParams::default().path("/stats"), "/_nodes/stats");
        let params = NodeParams { node_id: Some("node-1".into()) };
        assert_eq!(params.path(""), "/_nodes/node-1");
        assert_eq!(params.path("/stats"), "/_nodes/node-1/stats");
    }

    #[tokio::test]
    async fn test_nodes_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_nodes/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "nodes": {"abc": {"name": "es01"}, "def": {"name": "es02"}}
            })))
            .mount(&server)
            .await;

        let result = NodesStatsTool::execute(&client(&server), NodeParams::default()).await;
        assert!(text(&result).starts_with("Statistics for 2 node(s)"));
    }
}
