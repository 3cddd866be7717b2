//! Cluster monitoring tools.

pub mod health;
pub mod nodes;

pub use health::{ClusterHealthTool, ClusterInfoTool, ClusterStatsTool, NoParams, PendingTasksTool};
pub use nodes::{ListNodesTool, NodesInfoTool, NodesStatsTool};
