// src/storage/mod.rs
//! Content-addressed references and local export of attachments.

pub mod file_export;
pub mod ipfs_gateway;
