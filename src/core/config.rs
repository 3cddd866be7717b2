//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally loaded from a `.env` file).

use super::error::{Error, Result};
use super::transport::TransportConfig;

/// Default request timeout for Elasticsearch calls, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Connection settings for the Elasticsearch cluster.
    pub elasticsearch: ElasticsearchConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Connection settings for the Elasticsearch cluster.
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    /// Base endpoint of the cluster, e.g. `https://localhost:9200`.
    pub url: String,

    /// Authentication sources. Exactly one is used, see [`CredentialsConfig`].
    pub credentials: CredentialsConfig,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Skip TLS certificate verification on outbound requests.
    pub insecure: bool,
}

/// Authentication sources for the Elasticsearch cluster.
///
/// Resolved by precedence when the client is built: a pre-encoded API key,
/// then an API key id/secret pair, then username/password.
#[derive(Clone, Default)]
pub struct CredentialsConfig {
    /// Pre-encoded API key, sent verbatim.
    pub api_key: Option<String>,

    /// API key id, paired with `api_key_secret`.
    pub api_key_id: Option<String>,

    /// API key secret, paired with `api_key_id`.
    pub api_key_secret: Option<String>,

    /// Basic authentication username.
    pub username: Option<String>,

    /// Basic authentication password.
    pub password: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("CredentialsConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &redact(&self.api_key_secret))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

/// The credential selected from a [`CredentialsConfig`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    /// Pre-encoded API key.
    ApiKey(&'a str),
    /// API key id and secret, encoded together.
    ApiKeyPair { id: &'a str, secret: &'a str },
    /// Username and password.
    Basic { username: &'a str, password: &'a str },
}

impl Credential<'_> {
    /// Short name for logging.
    pub fn method(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api_key",
            Self::ApiKeyPair { .. } => "api_key_id",
            Self::Basic { .. } => "basic",
        }
    }
}

impl CredentialsConfig {
    /// Pick the credential by precedence: API key, then id/secret pair, then
    /// username/password. Incomplete pairs are skipped.
    pub fn resolve(&self) -> Option<Credential<'_>> {
        if let Some(api_key) = &self.api_key {
            return Some(Credential::ApiKey(api_key));
        }
        if let (Some(id), Some(secret)) = (&self.api_key_id, &self.api_key_secret) {
            return Some(Credential::ApiKeyPair { id, secret });
        }
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            return Some(Credential::Basic { username, password });
        }
        None
    }

    /// Name of the authentication method that will be used, if any.
    pub fn method(&self) -> Option<&'static str> {
        self.resolve().map(|credential| credential.method())
    }
}

impl ElasticsearchConfig {
    /// Create settings for the given endpoint with default timeout and no credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            credentials: CredentialsConfig::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            insecure: false,
        }
    }

    /// Use a pre-encoded API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.credentials.api_key = Some(api_key.into());
        self
    }

    /// Use an API key id/secret pair.
    pub fn with_api_key_pair(mut self, id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials.api_key_id = Some(id.into());
        self.credentials.api_key_secret = Some(secret.into());
        self
    }

    /// Use basic authentication.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials.username = Some(username.into());
        self.credentials.password = Some(password.into());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Load cluster settings from `ELASTICSEARCH_*` environment variables.
    ///
    /// Only the endpoint is mandatory here; missing credentials are reported
    /// when the client is constructed.
    pub fn from_env() -> Result<Self> {
        let url = non_empty_var("ELASTICSEARCH_URL")
            .ok_or_else(|| Error::config("ELASTICSEARCH_URL environment variable is required"))?;

        let credentials = CredentialsConfig {
            api_key: non_empty_var("ELASTICSEARCH_API_KEY"),
            api_key_id: non_empty_var("ELASTICSEARCH_API_KEY_ID"),
            api_key_secret: non_empty_var("ELASTICSEARCH_API_KEY_SECRET"),
            username: non_empty_var("ELASTICSEARCH_USERNAME"),
            password: non_empty_var("ELASTICSEARCH_PASSWORD"),
        };

        let timeout_ms = match non_empty_var("ELASTICSEARCH_TIMEOUT") {
            Some(raw) => raw.parse().map_err(|_| {
                Error::config(format!(
                    "ELASTICSEARCH_TIMEOUT must be a number of milliseconds, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let insecure = non_empty_var("ELASTICSEARCH_INSECURE")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            url,
            credentials,
            timeout_ms,
            insecure,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "elasticsearch-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            elasticsearch: ElasticsearchConfig::new("http://localhost:9200"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server-level variables are prefixed with `MCP_` (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`); cluster settings use `ELASTICSEARCH_*`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env()?;
        config.elasticsearch = ElasticsearchConfig::from_env()?;

        Ok(config)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
