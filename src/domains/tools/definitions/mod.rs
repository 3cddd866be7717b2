//! Tool definitions module.
//!
//! Tools are grouped by area; each implements
//! [`ToolHandler`](super::ToolHandler).

pub mod cluster;
pub mod common;
pub mod indices;
pub mod search;
pub mod security;

pub use cluster::{
    ClusterHealthTool, ClusterInfoTool, ClusterStatsTool, ListNodesTool, NodesInfoTool,
    NodesStatsTool, PendingTasksTool,
};
pub use indices::{
    CreateIndexTool, DeleteIndexTool, GetIndexSettingsTool, GetIndexTool, IndexStatsTool,
    ListAliasesTool, PutMappingTool, RefreshIndexTool, UpdateAliasesTool, UpdateIndexSettingsTool,
};
pub use search::{
    CountTool, DeleteDocumentTool, EsqlTool, GetDocumentTool, GetMappingsTool, GetShardsTool,
    IndexDocumentTool, ListIndicesTool, MultiSearchTool, SearchTool,
};
pub use security::{
    AuthenticateTool, CreateApiKeyTool, DeleteRoleTool, DeleteUserTool, GetApiKeysTool,
    GetRolesTool, GetUsersTool, InvalidateApiKeyTool, PutRoleTool, PutUserTool,
};
