// src/view/badge.rs
//! Badge and banner selection for a certificate view.
//!
//! Expiry takes visual precedence over the hash verification outcome, but
//! both banners are shown when both apply.

use crate::models::verification::VerificationState;

/// The single status badge shown on a certificate card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Expired,
    HashInvalid,
    Verified,
    Verifying,
}

impl Badge {
    /// Selects the badge for the given expiry flag and verification state.
    pub fn resolve(expired: bool, state: &VerificationState) -> Self {
        if expired {
            return Badge::Expired;
        }
        match state.is_valid() {
            Some(false) => Badge::HashInvalid,
            Some(true) => Badge::Verified,
            None => Badge::Verifying,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::Expired => "Expired",
            Badge::HashInvalid => "Hash invalid",
            Badge::Verified => "Verified",
            Badge::Verifying => "Verifying...",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Badge::Expired => "✗",
            Badge::HashInvalid => "⚠",
            Badge::Verified => "✓",
            Badge::Verifying => "…",
        }
    }
}

/// Warning banners shown above the certificate body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Expired,
    HashVerificationFailed,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        match self {
            Banner::Expired => "This NFT certificate has expired",
            Banner::HashVerificationFailed => {
                "Hash verification failed. The certificate data may have been tampered with"
            }
        }
    }
}

/// Banners that apply, expired first.
pub fn banners(expired: bool, state: &VerificationState) -> Vec<Banner> {
    let mut shown = Vec::new();
    if expired {
        shown.push(Banner::Expired);
    }
    if state.is_valid() == Some(false) {
        shown.push(Banner::HashVerificationFailed);
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::verification::VerificationResult;

    fn resolved(valid: bool) -> VerificationState {
        VerificationState::Resolved(VerificationResult::compared(
            "aa".to_string(),
            if valid { "aa" } else { "bb" },
        ))
    }

    #[test]
    fn test_expired_takes_precedence() {
        assert_eq!(Badge::resolve(true, &resolved(true)), Badge::Expired);
        assert_eq!(Badge::resolve(true, &resolved(false)), Badge::Expired);
        assert_eq!(Badge::resolve(true, &VerificationState::Pending), Badge::Expired);
    }

    #[test]
    fn test_verification_states() {
        assert_eq!(Badge::resolve(false, &resolved(true)), Badge::Verified);
        assert_eq!(Badge::resolve(false, &resolved(false)), Badge::HashInvalid);
        assert_eq!(Badge::resolve(false, &VerificationState::Pending), Badge::Verifying);
    }

    #[test]
    fn test_failed_computation_reads_as_invalid() {
        let state = VerificationState::Resolved(VerificationResult::failed("bad data"));
        assert_eq!(Badge::resolve(false, &state), Badge::HashInvalid);
    }

    #[test]
    fn test_both_banners_can_show() {
        assert_eq!(
            banners(true, &resolved(false)),
            vec![Banner::Expired, Banner::HashVerificationFailed]
        );
        assert_eq!(banners(false, &resolved(true)), vec![]);
        assert_eq!(banners(false, &VerificationState::Pending), vec![]);
    }
}
