//! Alias tools.

use rmcp::model::CallToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::core::ElasticClient;
use crate::core::elasticsearch::{cat_query, encode_segment};
use crate::domains::tools::ToolHandler;

use super::super::common::{array_len, error_result, invalid_params_result, structured_result};

/// Parameters for the list aliases tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListAliasesParams {
    /// Alias name or pattern. All aliases are listed when omitted.
    #[serde(default)]
    pub name: Option<String>,
}

/// List aliases via `_cat/aliases`.
pub struct ListAliasesTool;

#[async_trait::async_trait]
impl ToolHandler for ListAliasesTool {
    const NAME: &'static str = "list_aliases";
    const DESCRIPTION: &'static str = "List index aliases and the indices they point to.";

    type Params = ListAliasesParams;

    #[instrument(skip_all, fields(name = ?params.name))]
    async fn execute(client: &ElasticClient, params: ListAliasesParams) -> CallToolResult {
        info!("Listing aliases");

        let path = match &params.name {
            Some(name) => format!("/_cat/aliases/{}", encode_segment(name)),
            None => "/_cat/aliases".to_string(),
        };
        match client.get(&path, Some(&cat_query())).await.into_result() {
            Ok(data) => {
                let count = array_len(&data);
                structured_result(format!("Found {} alias(es)", count), data)
            }
            Err(failure) => error_result("Failed to list aliases", &failure),
        }
    }
}

/// Kind of alias change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AliasActionKind {
    Add,
    Remove,
}

impl AliasActionKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// One alias change.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AliasAction {
    /// `add` or `remove`.
    pub action: AliasActionKind,

    /// Index the alias points to.
    pub index: String,

    /// Alias name.
    pub alias: String,
}

/// Parameters for the update aliases tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateAliasesParams {
    /// Changes applied atomically, in order.
    pub actions: Vec<AliasAction>,
}

impl UpdateAliasesParams {
    fn body(&self) -> Value {
        let actions: Vec<Value> = self
            .actions
            .iter()
            .map(|a| json!({ (a.action.as_str()): { "index": a.index, "alias": a.alias } }))
            .collect();
        json!({ "actions": actions })
    }
}

/// Atomically add and remove aliases.
pub struct UpdateAliasesTool;

#[async_trait::async_trait]
impl ToolHandler for UpdateAliasesTool {
    const NAME: &'static str = "update_aliases";
    const DESCRIPTION: &'static str = "Atomically add and remove index aliases, e.g. to switch an alias from an old index to a new one.";

    type Params = UpdateAliasesParams;

    #[instrument(skip_all, fields(actions = params.actions.len()))]
    async fn execute(client: &ElasticClient, params: UpdateAliasesParams) -> CallToolResult {
        if params.actions.is_empty() {
            return invalid_params_result("Alias update requires at least one action");
        }
        info!("Updating aliases");

        match client.post("/_aliases", Some(params.body().into()), None).await.into_result() {
            Ok(response) => structured_result(
                format!("Applied {} alias action(s)", params.actions.len()),
                response,
            ),
            Err(failure) => error_result("Failed to update aliases", &failure),
        }
    }
}
