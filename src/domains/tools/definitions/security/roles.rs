//! Role management tools.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, instrument, warn};

use crate::core::ElasticClient;
use crate::core::elasticsearch::encode_segment;
use crate::domains::tools::ToolHandler;

use super::super::common::{error_result, object_len, structured_result};

fn role_path(name: &str) -> String {
    format!("/_security/role/{}", encode_segment(name))
}

/// Parameters for the get roles tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetRolesParams {
    /// Role name. All roles are listed when omitted.
    #[serde(default)]
    pub name: Option<String>,
}

/// List or fetch roles.
pub struct GetRolesTool;

#[async_trait::async_trait]
impl ToolHandler for GetRolesTool {
    const NAME: &'static str = "get_roles";
    const DESCRIPTION: &'static str = "List security roles, or get a single role by name, with its cluster and index privileges.";

    type Params = GetRolesParams;

    #[instrument(skip_all, fields(name = ?params.name))]
    async fn execute(client: &ElasticClient, params: GetRolesParams) -> CallToolResult {
        info!("Getting roles");

        let path = match &params.name {
            Some(name) => role_path(name),
            None => "/_security/role".to_string(),
        };
        match client.get(&path, None).await.into_result() {
            Ok(response) => {
                structured_result(format!("Found {} role(s)", object_len(&response)), response)
            }
            Err(failure) => error_result("Failed to get roles", &failure),
        }
    }
}

/// Index privileges granted by a role.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IndexPrivileges {
    /// Index names or patterns.
    pub names: Vec<String>,

    /// Privileges such as `read`, `write`, `manage`.
    pub privileges: Vec<String>,
}

/// Parameters for the put role tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PutRoleParams {
    /// Role name.
    pub name: String,

    /// Cluster privileges, e.g. `monitor`, `manage_index_templates`.
    #[serde(default)]
    pub cluster: Vec<String>,

    /// Index privileges.
    #[serde(default)]
    pub indices: Vec<IndexPrivileges>,

    /// Arbitrary metadata stored with the role.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl PutRoleParams {
    fn body(&self) -> Value {
        let mut body = json!({
            "cluster": self.cluster,
            "indices": self.indices,
        });
        if let Some(metadata) = &self.metadata {
            body["metadata"] = Value::Object(metadata.clone());
        }
        body
    }
}

/// Create or update a role.
pub struct PutRoleTool;

#[async_trait::async_trait]
impl ToolHandler for PutRoleTool {
    const NAME: &'static str = "put_role";
    const DESCRIPTION: &'static str = "Create or update a security role with cluster privileges and per-index privileges.";

    type Params = PutRoleParams;

    #[instrument(skip_all, fields(name = %params.name))]
    async fn execute(client: &ElasticClient, params: PutRoleParams) -> CallToolResult {
        info!("Putting role");

        let path = role_path(&params.name);
        match client.put(&path, Some(params.body().into()), None).await.into_result() {
            Ok(response) => {
                let action = if response["role"]["created"].as_bool().unwrap_or(false) {
                    "created"
                } else {
                    "updated"
                };
                structured_result(format!("Role '{}' {}", params.name, action), response)
            }
            Err(failure) => error_result(
                &format!("Failed to put role '{}'", params.name),
                &failure,
            ),
        }
    }
}

/// Parameters for the delete role tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteRoleParams {
    /// Role name.
    pub name: String,
}

/// Delete a role.
pub struct DeleteRoleTool;

#[async_trait::async_trait]
impl ToolHandler for DeleteRoleTool {
    const NAME: &'static str = "delete_role";
    const DESCRIPTION: &'static str = "Delete a security role.";

    type Params = DeleteRoleParams;

    #[instrument(skip_all, fields(name = %params.name))]
    async fn execute(client: &ElasticClient, params: DeleteRoleParams) -> CallToolResult {
        warn!("Deleting role '{}'", params.name);

        match client.delete(&role_path(&params.name), None, None).await.into_result() {
            Ok(response) => structured_result(format!("Role '{}' deleted", params.name), response),
            Err(failure) => error_result(
                &format!("Failed to delete role '{}'", params.name),
                &failure,
            ),
        }
    }
}
