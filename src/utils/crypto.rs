// src/utils/crypto.rs
//! Digest utilities for certificate integrity checks.
//!
//! Uses SHA-256 (via `ring`) for all operations, matching the digest the
//! certificate backend stores alongside each certificate.

use crate::error::VerifyError;
use ring::digest::{digest as ring_digest, SHA256};
use tokio::task;

/// Length of a rendered SHA-256 digest in hex characters.
pub const HEX_DIGEST_LEN: usize = 64;

/// Computes a SHA-256 hash of the input bytes.
///
/// # Arguments
/// * `data` - Binary data to hash (as bytes slice)
///
/// # Returns
/// Fixed-size 32-byte array (`[u8; 32]`) containing the hash.
pub fn hash_data(data: &[u8]) -> [u8; 32] {
    let output = ring_digest(&SHA256, data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(output.as_ref());
    bytes
}

/// Hashes a text payload and renders it as lowercase hex.
///
/// The payload is hashed as its UTF-8 bytes. The result is always
/// [`HEX_DIGEST_LEN`] characters long.
///
/// # Example
/// ```
/// use nft_cert_viewer::utils::crypto::digest;
///
/// assert_eq!(
///     digest(""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
pub fn digest(payload: &str) -> String {
    hex::encode(hash_data(payload.as_bytes()))
}

/// Hashes a payload on the blocking thread pool.
///
/// # Arguments
/// * `payload` - Text to hash (owned, moved onto the worker thread)
///
/// # Returns
/// - `Ok(hex)` with the lowercase hex digest
/// - `Err(VerifyError::Digest)` if the worker task panicked or was cancelled
pub async fn digest_async(payload: String) -> Result<String, VerifyError> {
    task::spawn_blocking(move || digest(&payload))
        .await
        .map_err(|join_err| VerifyError::Digest(join_err.to_string()))
}
