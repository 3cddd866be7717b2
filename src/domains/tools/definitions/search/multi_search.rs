//! Multi-search tool.
//!
//! Batches several searches into one `_msearch` call. The request body is
//! newline-delimited JSON: a header line naming the index followed by the
//! query body line, for each search.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::Body;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, invalid_params_result, structured_result};
use super::search::reshape_search_response;

/// One search within a multi-search request.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Index name or pattern to search.
    pub index: String,

    /// Query DSL request body for this search.
    #[serde(default)]
    pub query_body: Map<String, Value>,
}

/// Parameters for the multi-search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MultiSearchParams {
    /// Searches to execute in one round trip.
    pub searches: Vec<SearchRequest>,
}

impl MultiSearchParams {
    fn ndjson(&self) -> String {
        let mut body = String::new();
        for search in &self.searches {
            body.push_str(&json!({ "index": search.index }).to_string());
            body.push('\n');
            body.push_str(&Value::Object(search.query_body.clone()).to_string());
            body.push('\n');
        }
        body
    }
}

/// Multi-search tool.
pub struct MultiSearchTool;

#[async_trait::async_trait]
impl ToolHandler for MultiSearchTool {
    const NAME: &'static str = "multi_search";
    const DESCRIPTION: &'static str = "Run several searches, possibly against different indices, in a single request. Each entry takes an index and a Query DSL body; results are returned in the same order.";

    type Params = MultiSearchParams;

    #[instrument(skip_all, fields(searches = params.searches.len()))]
    async fn execute(client: &ElasticClient, params: MultiSearchParams) -> CallToolResult {
        if params.searches.is_empty() {
            return invalid_params_result("Multi-search requires at least one search");
        }
        info!("Running multi-search");

        let body = Body::NdJson(params.ndjson());
        match client.post("/_msearch", Some(body), None).await.into_result() {
            Ok(response) => {
                let responses: Vec<Value> = response["responses"]
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .zip(&params.searches)
                            .map(|(item, search)| {
                                let mut shaped = match item.get("error") {
                                    Some(error) => json!({ "error": error }),
                                    None => reshape_search_response(item),
                                };
                                shaped["index"] = json!(search.index);
                                shaped
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                let failed = responses.iter().filter(|r| r.get("error").is_some()).count();
                let summary = format!(
                    "Executed {} search(es), {} failed",
                    responses.len(),
                    failed
                );
                structured_result(summary, json!({ "responses": responses }))
            }
            Err(failure) => error_result("Multi-search failed", &failure),
        }
    }
}
