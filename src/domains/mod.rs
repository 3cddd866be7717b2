//! Domains module containing business logic organized by bounded contexts.
//!
//! The server exposes tools only; each tool group lives under `tools`.

pub mod tools;
