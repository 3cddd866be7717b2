//! Elasticsearch MCP server entry point.
//!
//! Loads configuration, initializes logging, builds the Elasticsearch client
//! and serves MCP over the configured transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use elasticsearch_mcp_server::core::{Config, ElasticClient, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);

    match config.elasticsearch.credentials.method() {
        Some(method) => info!("Elasticsearch authentication method: {}", method),
        None => warn!("No Elasticsearch credentials configured"),
    }
    let client = ElasticClient::new(&config.elasticsearch)?;

    if client.ping().await {
        info!("Connected to Elasticsearch at {}", client.base_url());
    } else {
        warn!(
            "Elasticsearch at {} is not reachable; tools will report connection errors until it is",
            client.base_url()
        );
    }

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config, client);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout is reserved for the STDIO transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
