// src/services/canonicalizer.rs
//! Canonical metadata form used as the exact hash input.
//!
//! The canonical form is a JSON object whose keys appear in a fixed order:
//! `name`, `description`, `image`, and `certificationFiles` only when the
//! certificate has attachments. Each attachment lists `fileName`, `fileType`,
//! `fileData`, `fileSize` in that order. The certificate backend computes the
//! stored hash over the same bytes, so any deviation here makes every
//! verification fail.

use crate::error::VerifyError;
use crate::models::certificate::{CertificateMetadata, FileRecord};
use crate::storage::ipfs_gateway::to_content_address;
use crate::utils::serialization::to_canonical_json;
use serde::Serialize;
use std::borrow::Cow;

/// Borrowed, order-fixed view of [`CertificateMetadata`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CanonicalForm<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub image: Cow<'a, str>,
    #[serde(rename = "certificationFiles", skip_serializing_if = "Vec::is_empty")]
    pub certification_files: Vec<CanonicalFile<'a>>,
}

/// One attachment inside [`CanonicalForm`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalFile<'a> {
    pub file_name: &'a str,
    pub file_type: &'a str,
    pub file_data: &'a str,
    pub file_size: u64,
}

impl<'a> From<&'a FileRecord> for CanonicalFile<'a> {
    fn from(file: &'a FileRecord) -> Self {
        CanonicalFile {
            file_name: &file.file_name,
            file_type: &file.file_type,
            file_data: &file.file_data,
            file_size: file.file_size,
        }
    }
}

impl CanonicalForm<'_> {
    /// Serializes to compact JSON.
    ///
    /// # Errors
    /// Returns [`VerifyError::Canonicalization`] if serialization fails.
    pub fn to_json(&self) -> Result<String, VerifyError> {
        Ok(to_canonical_json(self)?)
    }
}

/// Builds the canonical form of certificate metadata.
///
/// The image reference is normalized back to `ipfs://<CID>` when it points at
/// an IPFS HTTP gateway. Title and description are copied verbatim.
pub fn canonicalize(metadata: &CertificateMetadata) -> CanonicalForm<'_> {
    CanonicalForm {
        name: &metadata.title,
        description: &metadata.description,
        image: to_content_address(&metadata.image_reference),
        certification_files: metadata.attached_files.iter().map(CanonicalFile::from).collect(),
    }
}
