//! Elasticsearch REST client.
//!
//! - `client`: authenticated request execution and the liveness probe
//! - `outcome`: the uniform Success/Failure result and error taxonomy
//! - `request`: query strings, bodies and path segment encoding
//! - `error`: construction-time errors

mod client;
mod error;
mod outcome;
mod request;

pub use client::ElasticClient;
pub use error::ClientError;
pub use outcome::{ErrorKind, Failure, Outcome, RAW_BODY_KEY, decode_body};
pub use request::{Body, Query, cat_query, encode_segment};
