//! Shard listing tool.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::{cat_query, encode_segment};
use crate::domains::tools::ToolHandler;

use super::super::common::{array_len, error_result, structured_result};

/// Parameters for the get shards tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetShardsParams {
    /// Restrict to one index or pattern. All shards are listed when omitted.
    #[serde(default)]
    pub index: Option<String>,
}

/// Shard allocation listing via `_cat/shards`.
pub struct GetShardsTool;

#[async_trait::async_trait]
impl ToolHandler for GetShardsTool {
    const NAME: &'static str = "get_shards";
    const DESCRIPTION: &'static str = "List shards with their index, primary/replica role, state, document count, size and node. Optionally filter by index.";

    type Params = GetShardsParams;

    #[instrument(skip_all, fields(index = ?params.index))]
    async fn execute(client: &ElasticClient, params: GetShardsParams) -> CallToolResult {
        info!("Listing shards");

        let path = match &params.index {
            Some(index) => format!("/_cat/shards/{}", encode_segment(index)),
            None => "/_cat/shards".to_string(),
        };
        match client.get(&path, Some(&cat_query())).await.into_result() {
            Ok(data) => {
                let count = array_len(&data);
                structured_result(format!("Found {} shard(s)", count), data)
            }
            Err(failure) => error_result("Failed to list shards", &failure),
        }
    }
}
