//! List indices tool.
//!
//! Lists indices with health, status, document count and size via the
//! `_cat/indices` API.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::{cat_query, encode_segment};
use crate::domains::tools::ToolHandler;

use super::super::common::{array_len, error_result, structured_result};

/// Columns requested from `_cat/indices`.
const INDEX_COLUMNS: &str = "index,health,status,docs.count,store.size";

/// Parameters for the list indices tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListIndicesParams {
    /// Index name or wildcard pattern (e.g. `logs-*`). Lists all indices when omitted.
    #[serde(default)]
    pub index_pattern: Option<String>,

    /// Include hidden and system indices.
    #[serde(default)]
    pub include_hidden: bool,
}

/// List indices tool.
pub struct ListIndicesTool;

#[async_trait::async_trait]
impl ToolHandler for ListIndicesTool {
    const NAME: &'static str = "list_indices";
    const DESCRIPTION: &'static str = "List indices in the Elasticsearch cluster with their health, status, document count and store size. Optionally filter by an index name or wildcard pattern.";

    type Params = ListIndicesParams;

    #[instrument(skip_all, fields(pattern = ?params.index_pattern))]
    async fn execute(client: &ElasticClient, params: ListIndicesParams) -> CallToolResult {
        info!("Listing indices");

        let path = match &params.index_pattern {
            Some(pattern) => format!("/_cat/indices/{}", encode_segment(pattern)),
            None => "/_cat/indices".to_string(),
        };
        let mut query = cat_query().with("h", INDEX_COLUMNS).with("s", "index");
        if params.include_hidden {
            query = query.with("expand_wildcards", "all");
        }

        match client.get(&path, Some(&query)).await.into_result() {
            Ok(data) => {
                let count = array_len(&data);
                structured_result(format!("Found {} index(es)", count), data)
            }
            Err(failure) => error_result("Failed to list indices", &failure),
        }
    }
}
