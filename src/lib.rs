// src/lib.rs

//! # NFT Certificate Viewer
//!
//! Fetches an NFT certificate by request id and checks its integrity by
//! recomputing the metadata hash the certificate backend stored with it.
//!
//! ## Architecture Overview
//! 1. **Models**: certificate, attached files and verification outcomes
//! 2. **Services**: canonicalization, SHA-256 verification and re-verification scheduling
//! 3. **API Layer**: certificate fetch client with an explicit request-scoped cache
//! 4. **Storage Layer**: IPFS gateway mapping and attachment export
//! 5. **View Layer**: terminal rendering of cards, badges and fetch errors

pub mod api;        // Certificate API client and cache
pub mod error;      // Error types
pub mod models;     // Data structures
pub mod services;   // Verification logic
pub mod settings;   // Layered configuration
pub mod storage;    // IPFS references and file export
pub mod utils;      // Digest, serialization and formatting helpers
pub mod view;       // Terminal presentation

pub use models::certificate::{Certificate, CertificateMetadata, FileRecord};
pub use models::verification::{VerificationResult, VerificationState};
pub use services::canonicalizer::{canonicalize, CanonicalForm};
pub use services::session::VerificationSession;
pub use services::verifier::{compute_metadata_hash, verify};
pub use utils::crypto::digest;
