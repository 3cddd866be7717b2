//! Search and document tools.

pub mod documents;
pub mod esql;
pub mod list_indices;
pub mod mappings;
pub mod multi_search;
pub mod search;
pub mod shards;

pub use documents::{DeleteDocumentTool, GetDocumentTool, IndexDocumentTool};
pub use esql::EsqlTool;
pub use list_indices::ListIndicesTool;
pub use mappings::GetMappingsTool;
pub use multi_search::MultiSearchTool;
pub use search::{CountTool, SearchTool};
pub use shards::GetShardsTool;
