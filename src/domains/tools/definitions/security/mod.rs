//! Security administration tools: users, roles and API keys.

pub mod api_keys;
pub mod roles;
pub mod users;

pub use api_keys::{CreateApiKeyTool, GetApiKeysTool, InvalidateApiKeyTool};
pub use roles::{DeleteRoleTool, GetRolesTool, PutRoleTool};
pub use users::{AuthenticateTool, DeleteUserTool, GetUsersTool, PutUserTool};
