// src/view/card.rs
//! Plain-text certificate card.

use crate::models::certificate::{Certificate, FileKind, FileRecord};
use crate::models::verification::VerificationState;
use crate::utils::format::{format_date, format_file_size, format_hash_for_display};
use crate::view::badge::{banners, Badge};
use chrono::{DateTime, Utc};
use std::fmt;

/// Characters kept at each end of a shortened hash.
const HASH_DISPLAY_LEN: usize = 8;

fn file_icon(file: &FileRecord) -> &'static str {
    match file.kind() {
        FileKind::Image => "🖼️",
        FileKind::Pdf => "📄",
        FileKind::Other(_) => "📎",
    }
}

/// Plain-text card for one certificate, judged at a fixed render time.
pub struct CertificateCard<'a> {
    pub certificate: &'a Certificate,
    pub state: &'a VerificationState,
    pub now: DateTime<Utc>,
}

impl fmt::Display for CertificateCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let certificate = self.certificate;
        let expired = certificate.is_expired_at(self.now);
        let badge = Badge::resolve(expired, self.state);

        writeln!(f, "NFT Certificate  [{} {}]", badge.symbol(), badge.label())?;
        writeln!(f, "Token ID: {}", certificate.token_id)?;
        for banner in banners(expired, self.state) {
            writeln!(f, "! {}", banner.message())?;
        }
        writeln!(f)?;

        writeln!(f, "{}", certificate.title)?;
        writeln!(f, "{}", "=".repeat(certificate.title.chars().count().max(1)))?;
        if !certificate.description.is_empty() {
            writeln!(f, "{}", certificate.description)?;
        }
        writeln!(f)?;

        writeln!(f, "Image:      {}", certificate.image_url)?;
        writeln!(f, "Issued:     {}", format_date(&certificate.created_at))?;
        writeln!(
            f,
            "Expires:    {} ({})",
            format_date(&certificate.expired_at),
            if expired { "expired" } else { "valid" }
        )?;
        writeln!(
            f,
            "Hash:       {}",
            format_hash_for_display(&certificate.stored_hash, HASH_DISPLAY_LEN)
        )?;
        match self.state {
            VerificationState::Pending => writeln!(f, "Calculated: (verifying...)")?,
            VerificationState::Resolved(result) if !result.calculated_hash.is_empty() => writeln!(
                f,
                "Calculated: {}",
                format_hash_for_display(&result.calculated_hash, HASH_DISPLAY_LEN)
            )?,
            VerificationState::Resolved(_) => writeln!(f, "Calculated: (unavailable)")?,
        }

        if !certificate.files.is_empty() {
            writeln!(f, "\nFiles ({}):", certificate.files.len())?;
            for file in &certificate.files {
                writeln!(
                    f,
                    "  {} {} ({})",
                    file_icon(file),
                    file.file_name,
                    format_file_size(file.file_size)
                )?;
            }
        }
        Ok(())
    }
}

/// Renders a certificate with its badge, banners, details and files.
///
/// # Arguments
/// * `certificate` - Certificate to show
/// * `state` - Current verification state of the view
/// * `now` - Render time; expiry is judged against it
pub fn render_certificate(
    certificate: &Certificate,
    state: &VerificationState,
    now: DateTime<Utc>,
) -> String {
    CertificateCard {
        certificate,
        state,
        now,
    }
    .to_string()
}
