//! Elasticsearch MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing an Elasticsearch cluster as
//! a catalogue of tools: search and documents, index administration, cluster
//! monitoring and security administration.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the Elasticsearch client, the
//!   MCP server handler and the host transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool definitions and the registry that dispatches them
//!
//! # Example
//!
//! ```rust,no_run
//! use elasticsearch_mcp_server::core::{Config, ElasticClient, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ElasticClient::new(&config.elasticsearch)?;
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config, client)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, ElasticClient, Error, McpServer, Result};
