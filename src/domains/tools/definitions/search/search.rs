//! Search and count tools.
//!
//! `search` runs a Query DSL request and reshapes the response into a compact
//! hit list; `count` returns the number of matching documents.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, index_path, structured_result, total_hits};

/// Parameters for the search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Index name or pattern to search.
    pub index: String,

    /// Query DSL request body, e.g. `{"query": {"match": {"title": "rust"}}}`.
    /// May also carry `aggs`, `sort`, `highlight` and other search options.
    #[serde(default)]
    pub query_body: Map<String, Value>,

    /// Maximum number of hits to return. Overrides `size` in the body.
    #[serde(default)]
    pub size: Option<u32>,

    /// Offset of the first hit. Overrides `from` in the body.
    #[serde(default)]
    pub from: Option<u32>,

    /// Restrict returned `_source` to these fields.
    #[serde(default)]
    pub source_includes: Option<Vec<String>>,
}

impl SearchParams {
    /// Final request body with the explicit overrides applied.
    fn body(&self) -> Value {
        let mut body = self.query_body.clone();
        if let Some(size) = self.size {
            body.insert("size".into(), json!(size));
        }
        if let Some(from) = self.from {
            body.insert("from".into(), json!(from));
        }
        if let Some(fields) = &self.source_includes {
            body.insert("_source".into(), json!({ "includes": fields }));
        }
        Value::Object(body)
    }
}

/// Reduce a search response to totals, hits and aggregations.
pub(crate) fn reshape_search_response(response: &Value) -> Value {
    let hits: Vec<Value> = response["hits"]["hits"]
        .as_array()
        .map(|hits| {
            hits.iter()
                .map(|hit| {
                    let mut entry = json!({
                        "index": hit["_index"],
                        "id": hit["_id"],
                        "score": hit["_score"],
                        "source": hit["_source"],
                    });
                    if let Some(highlight) = hit.get("highlight") {
                        entry["highlight"] = highlight.clone();
                    }
                    entry
                })
                .collect()
        })
        .unwrap_or_default();

    let mut shaped = json!({
        "total": total_hits(response),
        "max_score": response["hits"]["max_score"],
        "took_ms": response["took"],
        "hits": hits,
    });
    if let Some(aggs) = response.get("aggregations") {
        shaped["aggregations"] = aggs.clone();
    }
    shaped
}

/// Search tool.
pub struct SearchTool;

#[async_trait::async_trait]
impl ToolHandler for SearchTool {
    const NAME: &'static str = "search";
    const DESCRIPTION: &'static str = "Search an Elasticsearch index using the Query DSL. Returns the total hit count, matching documents with scores and highlights, and any aggregations.";

    type Params = SearchParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: SearchParams) -> CallToolResult {
        info!("Searching index");

        let path = index_path(&params.index, "/_search");
        match client.post(&path, Some(params.body().into()), None).await.into_result() {
            Ok(response) => {
                let shaped = reshape_search_response(&response);
                let shown = shaped["hits"].as_array().map(Vec::len).unwrap_or(0);
                let summary = format!(
                    "Total hits: {} (showing {}) in '{}'",
                    shaped["total"], shown, params.index
                );
                structured_result(summary, shaped)
            }
            Err(failure) => error_result("Search failed", &failure),
        }
    }
}

/// Parameters for the count tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CountParams {
    /// Index name or pattern to count documents in.
    pub index: String,

    /// Optional Query DSL `query` clause, e.g. `{"term": {"status": "active"}}`.
    /// Counts all documents when omitted.
    #[serde(default)]
    pub query: Option<Map<String, Value>>,
}

/// Count tool.
pub struct CountTool;

#[async_trait::async_trait]
impl ToolHandler for CountTool {
    const NAME: &'static str = "count";
    const DESCRIPTION: &'static str = "Count the documents in an index, optionally restricted by a Query DSL query clause.";

    type Params = CountParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: CountParams) -> CallToolResult {
        info!("Counting documents");

        let body = params.query.map(|q| json!({ "query": q }).into());
        let path = index_path(&params.index, "/_count");
        match client.post(&path, body, None).await.into_result() {
            Ok(response) => {
                let count = response["count"].as_u64().unwrap_or(0);
                structured_result(
                    format!("{} document(s) in '{}'", count, params.index),
                    json!({ "index": params.index, "count": count }),
                )
            }
            Err(failure) => error_result("Count failed", &failure),
        }
    }
}
