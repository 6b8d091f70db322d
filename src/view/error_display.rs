// src/view/error_display.rs
//! User-facing text for certificate fetch failures.
//!
//! Failures are described by HTTP status. Errors that did not come from an
//! HTTP response are treated like a server error. A message supplied by the
//! API replaces the default explanation but never the title.

use crate::api::error::FetchError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub status: u16,
    pub title: &'static str,
    pub message: String,
    pub severity: Severity,
}

impl ErrorInfo {
    pub fn for_status(status: u16, api_message: Option<&str>) -> Self {
        let (title, default_message, severity) = match status {
            400 => (
                "Invalid request",
                "The request parameters are not valid.",
                Severity::Warning,
            ),
            403 => (
                "Access restricted",
                "This certificate is currently unavailable.",
                Severity::Error,
            ),
            404 => (
                "Certificate not found",
                "No certificate exists for the given id.",
                Severity::Warning,
            ),
            410 => (
                "Certificate expired",
                "This certificate has expired and can no longer be displayed.",
                Severity::Info,
            ),
            _ => (
                "Server error",
                "A temporary problem occurred. Please try again later.",
                Severity::Error,
            ),
        };

        ErrorInfo {
            status,
            title,
            message: api_message.unwrap_or(default_message).to_string(),
            severity,
        }
    }

    pub fn for_fetch_error(err: &FetchError) -> Self {
        match err {
            FetchError::Api {
                status,
                api_message,
                ..
            } => Self::for_status(*status, api_message.as_deref()),
            _ => Self::for_status(500, None),
        }
    }

    /// Whether retrying later may help.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500
    }
}

/// Error panel shown instead of a certificate.
pub struct ErrorPanel<'a> {
    pub info: &'a ErrorInfo,
    pub request_id: &'a str,
}

impl fmt::Display for ErrorPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.info.severity {
            Severity::Error => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
        };
        writeln!(f, "{} {}", marker, self.info.title)?;
        writeln!(f, "  {}", self.info.message)?;
        writeln!(f, "  Request ID: {}", self.request_id)?;
        if self.info.is_retryable() {
            writeln!(f, "  Please retry in a moment.")?;
        }
        Ok(())
    }
}

pub fn render_error(info: &ErrorInfo, request_id: &str) -> String {
    ErrorPanel { info, request_id }.to_string()
}

/// Message shown when no request id was supplied.
pub fn render_missing_request_id() -> String {
    "⚠ No NFT certificate id specified\n  Pass the certificate's request id as the first argument.\n"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorInfo::for_status(404, None).title, "Certificate not found");
        assert_eq!(ErrorInfo::for_status(404, None).severity, Severity::Warning);
        assert_eq!(ErrorInfo::for_status(410, None).severity, Severity::Info);
        assert_eq!(ErrorInfo::for_status(403, None).severity, Severity::Error);
        assert_eq!(ErrorInfo::for_status(502, None).title, "Server error");
        assert_eq!(ErrorInfo::for_status(418, None).title, "Server error");
    }

    #[test]
    fn test_api_message_overrides_default() {
        let info = ErrorInfo::for_status(400, Some("requestId is malformed"));
        assert_eq!(info.title, "Invalid request");
        assert_eq!(info.message, "requestId is malformed");
    }

    #[test]
    fn test_non_http_errors_read_as_server_errors() {
        let info = ErrorInfo::for_fetch_error(&FetchError::MissingData);
        assert_eq!(info.status, 500);
        assert!(info.is_retryable());
    }

    #[test]
    fn test_render_error_mentions_request_id() {
        let info = ErrorInfo::for_status(404, None);
        let text = render_error(&info, "req-9");
        assert!(text.contains("Certificate not found"));
        assert!(text.contains("req-9"));
        assert!(!text.contains("retry"));
    }

    #[test]
    fn test_server_error_panel_suggests_retry() {
        let info = ErrorInfo::for_status(503, None);
        let text = ErrorPanel {
            info: &info,
            request_id: "req-5",
        }
        .to_string();
        assert!(text.starts_with("✗ Server error\n"));
        assert!(text.ends_with("  Please retry in a moment.\n"));
    }
}
