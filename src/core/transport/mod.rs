//! Host transports for the MCP server.
//!
//! - **STDIO**: standard input/output, the default - feature: `stdio`
//! - **TCP**: line-delimited JSON-RPC, one session per connection - feature: `tcp`
//! - **HTTP**: JSON-RPC 2.0 over POST - feature: `http`
//!
//! Every transport hands requests to the same [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
