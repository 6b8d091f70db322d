// src/models/certificate.rs
//! Certificate data model.
//!
//! Defines the certificate as assembled by the fetch client, the attached
//! file records, and the metadata subset that participates in hash
//! verification.

use crate::error::VerifyError;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// A file attached to a certificate.
///
/// Field order matters: it is the order used when the record is written
/// into the canonical hash payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Original file name, e.g. `"transcript.pdf"`
    pub file_name: String,

    /// Loose type tag: `"image"`, `"pdf"` or anything else
    pub file_type: String,

    /// Base64-encoded file contents
    pub file_data: String,

    /// Declared size of the decoded contents in bytes
    pub file_size: u64,
}

/// Coarse classification of [`FileRecord::file_type`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Other(String),
}

impl FileRecord {
    /// Classifies the record's type tag.
    pub fn kind(&self) -> FileKind {
        match self.file_type.as_str() {
            "image" => FileKind::Image,
            "pdf" => FileKind::Pdf,
            other => FileKind::Other(other.to_string()),
        }
    }

    /// Decodes the base64 payload.
    ///
    /// ASCII whitespace is skipped, so line-wrapped payloads decode.
    ///
    /// # Errors
    /// Returns the decoder error if `file_data` is not valid standard base64.
    pub fn decode_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let compact: Vec<u8> = self
            .file_data
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        base64::decode(compact)
    }

    /// Checks that the payload decodes.
    ///
    /// A declared size that disagrees with the decoded length is only logged,
    /// since the hash covers the declared value as delivered.
    ///
    /// # Errors
    /// Returns [`VerifyError::Canonicalization`] for undecodable payloads.
    pub fn validate(&self) -> Result<(), VerifyError> {
        let decoded = self.decode_data().map_err(|e| {
            VerifyError::Canonicalization(format!(
                "file `{}` has malformed base64 data: {}",
                self.file_name, e
            ))
        })?;

        if decoded.len() as u64 != self.file_size {
            warn!(
                "file `{}` declares {} bytes but decodes to {} bytes",
                self.file_name,
                self.file_size,
                decoded.len()
            );
        }
        Ok(())
    }
}

/// A certificate as presented to the viewer.
///
/// Timestamps are already converted to UTC instants and `image_url` is the
/// display URL (content-addressed references rewritten to the HTTP gateway).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub request_id: String,
    pub token_id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,

    /// Hash asserted by the server over the canonical metadata
    #[serde(rename = "hash")]
    pub stored_hash: String,

    pub created_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,

    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl Certificate {
    /// Whether the certificate's expiry instant lies before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expired_at
    }

    /// Whether the certificate has expired, evaluated against the current clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// The certificate fields covered by the integrity hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateMetadata {
    pub title: String,
    pub description: String,

    /// Image URI, either direct or content-addressed (`ipfs://...`)
    pub image_reference: String,

    pub attached_files: Vec<FileRecord>,
}

impl CertificateMetadata {
    /// Extracts and validates the hashable subset of a certificate.
    ///
    /// # Errors
    /// Returns [`VerifyError::Canonicalization`] if any attached file fails
    /// [`FileRecord::validate`].
    pub fn from_certificate(certificate: &Certificate) -> Result<Self, VerifyError> {
        for file in &certificate.files {
            file.validate()?;
        }

        Ok(Self {
            title: certificate.title.clone(),
            description: certificate.description.clone(),
            image_reference: certificate.image_url.clone(),
            attached_files: certificate.files.clone(),
        })
    }
}
