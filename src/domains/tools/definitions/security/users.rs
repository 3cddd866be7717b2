//! User management tools and the authenticate probe.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use crate::core::ElasticClient;
use crate::core::elasticsearch::encode_segment;
use crate::domains::tools::ToolHandler;
use crate::domains::tools::definitions::cluster::NoParams;

use super::super::common::{error_result, object_len, structured_result};

fn user_path(username: &str) -> String {
    format!("/_security/user/{}", encode_segment(username))
}

/// Identity of the credentials the server is using.
pub struct AuthenticateTool;

#[async_trait::async_trait]
impl ToolHandler for AuthenticateTool {
    const NAME: &'static str = "authenticate";
    const DESCRIPTION: &'static str = "Show the user, roles and authentication realm of the credentials this server uses to reach Elasticsearch.";

    type Params = NoParams;

    #[instrument(skip_all)]
    async fn execute(client: &ElasticClient, _params: NoParams) -> CallToolResult {
        info!("Authenticating");

        match client.get("/_security/_authenticate", None).await.into_result() {
            Ok(response) => {
                let summary = format!(
                    "Authenticated as '{}' via {}",
                    response["username"].as_str().unwrap_or("unknown"),
                    response["authentication_type"].as_str().unwrap_or("unknown")
                );
                structured_result(summary, response)
            }
            Err(failure) => error_result("Authentication check failed", &failure),
        }
    }
}

/// Parameters for the get users tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetUsersParams {
    /// Username to fetch. All native users are listed when omitted.
    #[serde(default)]
    pub username: Option<String>,
}

/// List or fetch native realm users.
pub struct GetUsersTool;

#[async_trait::async_trait]
impl ToolHandler for GetUsersTool {
    const NAME: &'static str = "get_users";
    const DESCRIPTION: &'static str = "List native realm users, or get a single user by username, with roles, full name, email and enabled flag.";

    type Params = GetUsersParams;

    #[instrument(skip_all, fields(username = ?params.username))]
    async fn execute(client: &ElasticClient, params: GetUsersParams) -> CallToolResult {
        info!("Getting users");

        let path = match &params.username {
            Some(username) => user_path(username),
            None => "/_security/user".to_string(),
        };
        match client.get(&path, None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Found {} user(s)", object_len(&response)), response)
            }
            Err(failure) => error_result("Failed to get users", &failure),
        }
    }
}

/// Parameters for the put user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PutUserParams {
    /// Username to create or update.
    pub username: String,

    /// Password (at least 6 characters). Required when creating a user.
    #[serde(default)]
    pub password: Option<String>,

    /// Roles granted to the user.
    pub roles: Vec<String>,

    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email: Option<String>,

    /// Whether the user can authenticate. Defaults to true on creation.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Arbitrary metadata stored with the user.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl PutUserParams {
    fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("roles".into(), json!(self.roles));
        if let Some(password) = &self.password {
            body.insert("password".into(), json!(password));
        }
        if let Some(full_name) = &self.full_name {
            body.insert("full_name".into(), json!(full_name));
        }
        if let Some(email) = &self.email {
            body.insert("email".into(), json!(email));
        }
        if let Some(enabled) = self.enabled {
            body.insert("enabled".into(), json!(enabled));
        }
        if let Some(metadata) = &self.metadata {
            body.insert("metadata".into(), Value::Object(metadata.clone()));
        }
        Value::Object(body)
    }
}

/// Create or update a native user.
pub struct PutUserTool;

#[async_trait::async_trait]
impl ToolHandler for PutUserTool {
    const NAME: &'static str = "put_user";
    const DESCRIPTION: &'static str = "Create a native realm user or update an existing one's roles, password, name, email or enabled flag.";

    type Params = PutUserParams;

    #[instrument(skip_all, fields(username = %params.username))]
    async fn execute(client: &ElasticClient, params: PutUserParams) -> CallToolResult {
        info!("Putting user");

        let path = user_path(&params.username);
        match client.put(&path, Some(params.body().into()), None).await.into_result() {
            Ok(response) => {
                let action = if response["created"].as_bool().unwrap_or(false) {
                    "created"
                } else {
                    "updated"
                };
                structured_result(format!("User '{}' {}", params.username, action), response)
            }
            Err(failure) => error_result(
                &format!("Failed to put user '{}'", params.username),
                &failure,
            ),
        }
    }
}

/// Parameters for the delete user tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteUserParams {
    /// Username to delete.
    pub username: String,
}

/// Delete a native user.
pub struct DeleteUserTool;

#[async_trait::async_trait]
impl ToolHandler for DeleteUserTool {
    const NAME: &'static str = "delete_user";
    const DESCRIPTION: &'static str = "Delete a native realm user.";

    type Params = DeleteUserParams;

    #[instrument(skip_all, fields(username = %params.username))]
    async fn execute(client: &ElasticClient, params: DeleteUserParams) -> CallToolResult {
        warn!("Deleting user '{}'", params.username);

        let path = user_path(&params.username);
        match client.delete(&path, None, None).await.into_result() {
            Ok(response) => {
                let summary = if response["found"].as_bool().unwrap_or(false) {
                    format!("User '{}' deleted", params.username)
                } else {
                    format!("User '{}' was not found", params.username)
                };
                structured_result(summary, response)
            }
            Err(failure) => error_result(
                &format!("Failed to delete user '{}'", params.username),
                &failure,
            ),
        }
    }
}
