//! Document tools: get, index and delete single documents.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::{Query, encode_segment};
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, index_path, structured_result};

fn doc_path(index: &str, id: &str) -> String {
    index_path(index, &format!("/_doc/{}", encode_segment(id)))
}

/// Parameters for the get document tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDocumentParams {
    /// Index containing the document.
    pub index: String,

    /// Document id.
    pub id: String,
}

/// Get a document by id.
pub struct GetDocumentTool;

#[async_trait::async_trait]
impl ToolHandler for GetDocumentTool {
    const NAME: &'static str = "get_document";
    const DESCRIPTION: &'static str = "Retrieve a single document from an index by its id.";

    type Params = GetDocumentParams;

    #[instrument(skip_all, fields(index = %params.index, id = %params.id))]
    async fn execute(client: &ElasticClient, params: GetDocumentParams) -> CallToolResult {
        info!("Getting document");

        match client.get(&doc_path(&params.index, &params.id), None).await.into_result() {
            Ok(doc) => {
                let shaped = json!({
                    "index": doc["_index"],
                    "id": doc["_id"],
                    "version": doc["_version"],
                    "source": doc["_source"],
                });
                structured_result(
                    format!("Document '{}' from '{}'", params.id, params.index),
                    shaped,
                )
            }
            Err(failure) => error_result(
                &format!("Failed to get document '{}'", params.id),
                &failure,
            ),
        }
    }
}

/// Parameters for the index document tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IndexDocumentParams {
    /// Target index.
    pub index: String,

    /// Document id. A new id is generated when omitted.
    #[serde(default)]
    pub id: Option<String>,

    /// Document body.
    pub document: Map<String, Value>,

    /// Refresh policy: `true`, `false` or `wait_for`.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Create or replace a document.
pub struct IndexDocumentTool;

#[async_trait::async_trait]
impl ToolHandler for IndexDocumentTool {
    const NAME: &'static str = "index_document";
    const DESCRIPTION: &'static str = "Index a document. With an id the document is created or replaced; without one Elasticsearch assigns an id.";

    type Params = IndexDocumentParams;

    #[instrument(skip_all, fields(index = %params.index, id = ?params.id))]
    async fn execute(client: &ElasticClient, params: IndexDocumentParams) -> CallToolResult {
        info!("Indexing document");

        let query = Query::new().with_opt("refresh", params.refresh.as_deref());
        let body = Some(Value::Object(params.document).into());
        let outcome = match &params.id {
            Some(id) => client.put(&doc_path(&params.index, id), body, Some(&query)).await,
            None => {
                client
                    .post(&index_path(&params.index, "/_doc"), body, Some(&query))
                    .await
            }
        };

        match outcome.into_result() {
            Ok(response) => {
                let summary = format!(
                    "Document '{}' {} in '{}'",
                    response["_id"].as_str().unwrap_or("?"),
                    response["result"].as_str().unwrap_or("indexed"),
                    params.index
                );
                structured_result(summary, response)
            }
            Err(failure) => error_result("Failed to index document", &failure),
        }
    }
}

/// Parameters for the delete document tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteDocumentParams {
    /// Index containing the document.
    pub index: String,

    /// Document id.
    pub id: String,

    /// Refresh policy: `true`, `false` or `wait_for`.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Delete a document by id.
pub struct DeleteDocumentTool;

#[async_trait::async_trait]
impl ToolHandler for DeleteDocumentTool {
    const NAME: &'static str = "delete_document";
    const DESCRIPTION: &'static str = "Delete a single document from an index by its id.";

    type Params = DeleteDocumentParams;

    #[instrument(skip_all, fields(index = %params.index, id = %params.id))]
    async fn execute(client: &ElasticClient, params: DeleteDocumentParams) -> CallToolResult {
        info!("Deleting document");

        let query = Query::new().with_opt("refresh", params.refresh.as_deref());
        let path = doc_path(&params.index, &params.id);
        match client.delete(&path, None, Some(&query)).await.into_result() {
            Ok(response) => structured_result(
                format!(
                    "Document '{}' {} from '{}'",
                    params.id,
                    response["result"].as_str().unwrap_or("deleted"),
                    params.index
                ),
                response,
            ),
            Err(failure) => error_result(
                &format!("Failed to delete document '{}'", params.id),
                &failure,
            ),
        }
    }
}
