//! API key tools.
//!
//! `create_api_key` returns the key id and its base64 `encoded` form, ready
//! for an `Authorization: ApiKey` header. The raw `api_key` secret is never
//! included in the result.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use crate::core::ElasticClient;
use crate::core::elasticsearch::Query;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, invalid_params_result, structured_result};

/// Parameters for the create API key tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateApiKeyParams {
    /// Name of the key.
    pub name: String,

    /// Lifetime such as `1d` or `30d`. The key does not expire when omitted.
    #[serde(default)]
    pub expiration: Option<String>,

    /// Role descriptors limiting the key's privileges, keyed by role name.
    /// The key inherits the creator's privileges when omitted.
    #[serde(default)]
    pub role_descriptors: Option<Map<String, Value>>,

    /// Arbitrary metadata stored with the key.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateApiKeyParams {
    fn body(&self) -> Value {
        let mut body = json!({ "name": self.name });
        if let Some(expiration) = &self.expiration {
            body["expiration"] = json!(expiration);
        }
        if let Some(descriptors) = &self.role_descriptors {
            body["role_descriptors"] = Value::Object(descriptors.clone());
        }
        if let Some(metadata) = &self.metadata {
            body["metadata"] = Value::Object(metadata.clone());
        }
        body
    }
}

/// Create an API key.
pub struct CreateApiKeyTool;

#[async_trait::async_trait]
impl ToolHandler for CreateApiKeyTool {
    const NAME: &'static str = "create_api_key";
    const DESCRIPTION: &'static str = "Create an API key, optionally with an expiration and restricted role descriptors. Returns the key id and its encoded form for use in an 'Authorization: ApiKey <encoded>' header.";

    type Params = CreateApiKeyParams;

    #[instrument(skip_all, fields(name = %params.name))]
    async fn execute(client: &ElasticClient, params: CreateApiKeyParams) -> CallToolResult {
        info!("Creating API key");

        let body = params.body().into();
        match client.post("/_security/api_key", Some(body), None).await.into_result() {
            Ok(response) => {
                let shaped = json!({
                    "id": response["id"],
                    "name": response["name"],
                    "expiration": response["expiration"],
                    "encoded": response["encoded"],
                });
                structured_result(format!("API key '{}' created", params.name), shaped)
            }
            Err(failure) => error_result(
                &format!("Failed to create API key '{}'", params.name),
                &failure,
            ),
        }
    }
}

/// Parameters for the get API keys tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetApiKeysParams {
    /// Key id.
    #[serde(default)]
    pub id: Option<String>,

    /// Key name; wildcards are supported.
    #[serde(default)]
    pub name: Option<String>,

    /// Owner username.
    #[serde(default)]
    pub username: Option<String>,

    /// Only keys owned by the current user.
    #[serde(default)]
    pub owner: Option<bool>,
}

impl GetApiKeysParams {
    fn query(&self) -> Query {
        Query::new()
            .with_opt("id", self.id.as_deref())
            .with_opt("name", self.name.as_deref())
            .with_opt("username", self.username.as_deref())
            .with_opt("owner", self.owner)
    }
}

/// List API keys.
pub struct GetApiKeysTool;

#[async_trait::async_trait]
impl ToolHandler for GetApiKeysTool {
    const NAME: &'static str = "get_api_keys";
    const DESCRIPTION: &'static str = "List API keys with their id, name, owner, creation and expiration time and invalidation state. Filter by id, name, username or ownership.";

    type Params = GetApiKeysParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, params: GetApiKeysParams) -> CallToolResult {
        info!("Getting API keys");

        let query = params.query();
        match client.get("/_security/api_key", Some(&query)).await.into_result() {
            Ok(response) => {
                let count = response["api_keys"].as_array().map(Vec::len).unwrap_or(0);
                structured_result(format!("Found {} API key(s)", count), response)
            }
            Err(failure) => error_result("Failed to get API keys", &failure),
        }
    }
}

/// Parameters for the invalidate API key tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct InvalidateApiKeyParams {
    /// Ids of the keys to invalidate.
    #[serde(default)]
    pub ids: Option<Vec<String>>,

    /// Name of the keys to invalidate.
    #[serde(default)]
    pub name: Option<String>,
}

/// Invalidate API keys.
pub struct InvalidateApiKeyTool;

#[async_trait::async_trait]
impl ToolHandler for InvalidateApiKeyTool {
    const NAME: &'static str = "invalidate_api_key";
    const DESCRIPTION: &'static str = "Invalidate API keys by id or by name. Invalidated keys can no longer authenticate.";

    type Params = InvalidateApiKeyParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, params: InvalidateApiKeyParams) -> CallToolResult {
        let mut body = Map::new();
        if let Some(ids) = params.ids.filter(|ids| !ids.is_empty()) {
            body.insert("ids".into(), json!(ids));
        }
        if let Some(name) = params.name {
            body.insert("name".into(), json!(name));
        }
        if body.is_empty() {
            return invalid_params_result("Invalidating API keys requires 'ids' or 'name'");
        }
        warn!("Invalidating API keys");

        let body = Value::Object(body).into();
        match client.delete("/_security/api_key", Some(body), None).await.into_result() {
            Ok(response) => {
                let count = response["invalidated_api_keys"]
                    .as_array()
                    .map(Vec::len)
                    .unwrap_or(0);
                structured_result(format!("Invalidated {} API key(s)", count), response)
            }
            Err(failure) => error_result("Failed to invalidate API keys", &failure),
        }
    }
}
