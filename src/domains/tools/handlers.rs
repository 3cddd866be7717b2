//! Tool handler trait.
//!
//! Every tool is a unit struct implementing [`ToolHandler`]: a name, a
//! description, an explicit parameter struct whose JSON schema is derived at
//! compile time, and an `execute` function issuing one Elasticsearch call.

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::{
    handler::server::tool::schema_for_type,
    model::{CallToolResult, Content, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use super::error::ToolError;
use crate::core::ElasticClient;

/// Trait implemented by every Elasticsearch tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Parameters accepted by the tool.
    type Params: DeserializeOwned + JsonSchema + Send + 'static;

    /// Run the tool against the cluster.
    ///
    /// Failures from the cluster are rendered into an error-flagged result,
    /// never returned as errors.
    async fn execute(client: &ElasticClient, params: Self::Params) -> CallToolResult;

    /// Create a Tool model for this tool (metadata).
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<Self::Params>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Validate raw arguments against [`Self::Params`] and execute.
    fn invoke(
        client: Arc<ElasticClient>,
        arguments: JsonObject,
    ) -> BoxFuture<'static, CallToolResult> {
        async move {
            match serde_json::from_value::<Self::Params>(serde_json::Value::Object(arguments)) {
                Ok(params) => Self::execute(&client, params).await,
                Err(e) => {
                    let error = ToolError::invalid_arguments(Self::NAME, e.to_string());
                    warn!("{}", error);
                    CallToolResult::error(vec![Content::text(error.to_string())])
                }
            }
        }
        .boxed()
    }
}
