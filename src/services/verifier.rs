// src/services/verifier.rs
//! Certificate hash verification.
//!
//! Recomputes the metadata hash of a certificate and compares it with the
//! hash delivered by the server. Verification never fails from the caller's
//! point of view: any error raised while building the canonical form or
//! hashing it is folded into an invalid [`VerificationResult`] that carries
//! the error message.

use crate::error::VerifyError;
use crate::models::certificate::{Certificate, CertificateMetadata};
use crate::models::verification::VerificationResult;
use crate::services::canonicalizer::canonicalize;
use crate::utils::crypto::digest_async;
use log::{debug, error, info, warn};

/// Computes the SHA-256 hash of a metadata set's canonical form.
///
/// # Arguments
/// * `metadata` - Validated hashable subset of a certificate
///
/// # Returns
/// - `Ok(hex)` with the 64-character lowercase digest
/// - `Err(VerifyError)` if canonical serialization or hashing fails
pub async fn compute_metadata_hash(metadata: &CertificateMetadata) -> Result<String, VerifyError> {
    let payload = canonicalize(metadata).to_json()?;
    debug!("hashing canonical metadata ({} bytes)", payload.len());
    digest_async(payload).await
}

/// Verifies a certificate against a stored hash.
///
/// # Arguments
/// * `certificate` - Certificate as delivered by the fetch client
/// * `stored_hash` - Hex digest asserted by the server
///
/// # Returns
/// A [`VerificationResult`]; the comparison is exact and case-sensitive.
///
/// # Process Flow
/// 1. Extracts and validates the hashable metadata
/// 2. Builds the canonical form and serializes it
/// 3. Hashes the payload with SHA-256
/// 4. Compares against `stored_hash`
pub async fn verify(certificate: &Certificate, stored_hash: &str) -> VerificationResult {
    match try_verify(certificate, stored_hash).await {
        Ok(result) => {
            if result.is_valid {
                info!("certificate {} hash verified", certificate.request_id);
            } else {
                warn!(
                    "certificate {} hash mismatch: calculated {}, stored {}",
                    certificate.request_id, result.calculated_hash, stored_hash
                );
            }
            result
        }
        Err(e) => {
            error!("hash verification failed for {}: {}", certificate.request_id, e);
            VerificationResult::failed(e.to_string())
        }
    }
}

async fn try_verify(certificate: &Certificate, stored_hash: &str) -> Result<VerificationResult, VerifyError> {
    let metadata = CertificateMetadata::from_certificate(certificate)?;
    let calculated_hash = compute_metadata_hash(&metadata).await?;
    debug!("calculated hash {}", calculated_hash);
    Ok(VerificationResult::compared(calculated_hash, stored_hash))
}
