// src/models/verification.rs
//! Verification outcome types.

use serde::{Deserialize, Serialize};

/// Outcome of one verification attempt.
///
/// `calculated_hash` is empty when the hash could not be computed; in that
/// case `error` describes why. A plain mismatch has `is_valid == false` and no
/// error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    pub calculated_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    /// Result of a completed hash comparison.
    pub fn compared(calculated_hash: String, stored_hash: &str) -> Self {
        Self {
            is_valid: calculated_hash == stored_hash,
            calculated_hash,
            error: None,
        }
    }

    /// Result of an attempt that failed before a hash could be compared.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            calculated_hash: String::new(),
            error: Some(error.into()),
        }
    }
}

/// Lifecycle of verification as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerificationState {
    /// The hash is still being computed.
    #[default]
    Pending,
    /// The attempt finished, successfully or not.
    Resolved(VerificationResult),
}

impl VerificationState {
    /// `None` while pending, otherwise the resolved validity.
    pub fn is_valid(&self) -> Option<bool> {
        match self {
            VerificationState::Pending => None,
            VerificationState::Resolved(result) => Some(result.is_valid),
        }
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        match self {
            VerificationState::Pending => None,
            VerificationState::Resolved(result) => Some(result),
        }
    }
}
