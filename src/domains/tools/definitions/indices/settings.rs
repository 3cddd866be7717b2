//! Index settings and mapping update tools.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, index_path, structured_result};
use super::manage::IndexParams;

/// Read index settings.
pub struct GetIndexSettingsTool;

#[async_trait::async_trait]
impl ToolHandler for GetIndexSettingsTool {
    const NAME: &'static str = "get_index_settings";
    const DESCRIPTION: &'static str = "Get the settings of an index (shards, replicas, refresh interval, analysis, ...).";

    type Params = IndexParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: IndexParams) -> CallToolResult {
        info!("Getting index settings");

        let path = index_path(&params.index, "/_settings");
        match client.get(&path, None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Settings for '{}'", params.index), response)
            }
            Err(failure) => error_result(
                &format!("Failed to get settings for '{}'", params.index),
                &failure,
            ),
        }
    }
}

/// Parameters for the update settings tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateIndexSettingsParams {
    /// Index name or pattern.
    pub index: String,

    /// Dynamic settings to change, e.g. `{"index": {"number_of_replicas": 2}}`.
    pub settings: Map<String, Value>,
}

/// Update dynamic index settings.
pub struct UpdateIndexSettingsTool;

#[async_trait::async_trait]
impl ToolHandler for UpdateIndexSettingsTool {
    const NAME: &'static str = "update_index_settings";
    const DESCRIPTION: &'static str = "Update dynamic settings of an existing index, such as number_of_replicas or refresh_interval.";

    type Params = UpdateIndexSettingsParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: UpdateIndexSettingsParams) -> CallToolResult {
        info!("Updating index settings");

        let path = index_path(&params.index, "/_settings");
        let body = Value::Object(params.settings).into();
        match client.put(&path, Some(body), None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Settings updated for '{}'", params.index), response)
            }
            Err(failure) => error_result(
                &format!("Failed to update settings for '{}'", params.index),
                &failure,
            ),
        }
    }
}

/// Parameters for the put mapping tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PutMappingParams {
    /// Index name or pattern.
    pub index: String,

    /// Field definitions to add, e.g. `{"tags": {"type": "keyword"}}`.
    pub properties: Map<String, Value>,
}

/// Add fields to an index mapping.
pub struct PutMappingTool;

#[async_trait::async_trait]
impl ToolHandler for PutMappingTool {
    const NAME: &'static str = "put_mapping";
    const DESCRIPTION: &'static str = "Add new fields to an existing index mapping. Existing field types cannot be changed.";

    type Params = PutMappingParams;

    #[instrument(skip_all, fields(index = %params.index))]
    async fn execute(client: &ElasticClient, params: PutMappingParams) -> CallToolResult {
        info!("Updating mapping");

        let path = index_path(&params.index, "/_mapping");
        let body = json!({ "properties": params.properties }).into();
        match client.put(&path, Some(body), None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Mapping updated for '{}'", params.index), response)
            }
            Err(failure) => error_result(
                &format!("Failed to update mapping for '{}'", params.index),
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

    #[tokio::test]
    async fn test_put_mapping_wraps_properties() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/books/_mapping"))
            .and(body_json(json!({"properties": {"tags": {"type": "keyword"}}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
            .mount(&server)
            .await;

        let params: PutMappingParams = serde_json::from_value(json!({
            "index": "books", "properties": {"tags": {"type": "keyword"}}
        }))
        .unwrap();
        let result = PutMappingTool::execute(&client(&server), params).await;
        assert!(!is_error(&result));
        assert!(text(&result).starts_with("Mapping updated for 'books'"));
    }

    #[tokio::test]
    async fn test_mapping_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"type": "illegal_argument_exception",
                          "reason": "mapper [title] cannot be changed from type [text] to [keyword]"}
            })))
            .mount(&server)
            .await;

        let params: PutMappingParams = serde_json::from_value(json!({
            "index": "books", "properties": {"title": {"type": "keyword"}}
        }))
        .unwrap();
        let result = PutMappingTool::execute(&client(&server), params).await;
        assert!(is_error(&result));
        assert!(text(&result).starts_with(
            "Failed to update mapping for 'books': [illegal_argument_exception]"
        ));
    }

    #[tokio::test]
    async fn test_update_settings() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/books/_settings"))
            .and(body_json(json!({"index": {"number_of_replicas": 2}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
            .mount(&server)
            .await;

        let params: UpdateIndexSettingsParams = serde_json::from_value(json!({
            "index": "books", "settings": {"index": {"number_of_replicas": 2}}
        }))
        .unwrap();
        let result = UpdateIndexSettingsTool::execute(&client(&server), params).await;
        assert!(!is_error(&result));
    }
}
