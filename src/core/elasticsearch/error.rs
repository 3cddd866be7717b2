//! Client construction errors.

use thiserror::Error;

/// Errors raised while building an [`ElasticClient`](super::ElasticClient).
///
/// Requests themselves never fail with this type; they resolve to an
/// [`Outcome`](super::Outcome).
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable credential source was configured.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

impl ClientError {
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }
}
