// src/api/mod.rs
//! Certificate API access: HTTP client, errors and the request-scoped cache.

pub mod cache;
pub mod client;
pub mod error;
