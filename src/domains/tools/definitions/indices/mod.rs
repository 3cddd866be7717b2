//! Index administration tools.

pub mod aliases;
pub mod manage;
pub mod settings;

pub use aliases::{ListAliasesTool, UpdateAliasesTool};
pub use manage::{CreateIndexTool, DeleteIndexTool, GetIndexTool, IndexStatsTool, RefreshIndexTool};
pub use settings::{GetIndexSettingsTool, PutMappingTool, UpdateIndexSettingsTool};
