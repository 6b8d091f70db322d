// src/error.rs
//! Error types for certificate verification and configuration.

use thiserror::Error;

/// Failures that can occur while computing a certificate's metadata hash.
///
/// A hash mismatch is not represented here: it is an expected outcome and is
/// reported through [`crate::models::verification::VerificationResult`].
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Metadata could not be turned into its canonical JSON form.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),

    /// The digest primitive failed or could not be scheduled.
    #[error("digest computation failed: {0}")]
    Digest(String),
}

impl From<serde_json::Error> for VerifyError {
    fn from(err: serde_json::Error) -> Self {
        VerifyError::Canonicalization(err.to_string())
    }
}

/// Failures while loading application settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failures while writing decoded attachments to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("file `{file}` has malformed base64 data: {source}")]
    Decode {
        file: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("file name `{0}` cannot be used as an export path")]
    InvalidName(String),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
