//! Tools domain module.
//!
//! Tools are the only MCP capability this server exposes. Each one maps a
//! typed parameter struct onto a single Elasticsearch REST call.
//!
//! ## Architecture
//!
//! - `definitions/` - Tool implementations, grouped by area (search,
//!   indices, cluster, security)
//! - `handlers.rs` - The [`ToolHandler`] trait every tool implements
//! - `registry.rs` - Tool catalogue and dispatch, shared by all transports
//! - `error.rs` - Dispatch error types
//!
//! ## Adding a New Tool
//!
//! 1. Add a params struct and a unit struct implementing `ToolHandler` in
//!    the matching `definitions/` group
//! 2. Export it from the group's `mod.rs` and from `definitions/mod.rs`
//! 3. Add `entry::<MyTool>()` in `ToolRegistry::new`

pub mod definitions;
mod error;
mod handlers;
mod registry;

pub use error::ToolError;
pub use handlers::*;
pub use registry::ToolRegistry;
