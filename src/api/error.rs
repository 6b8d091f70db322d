// src/api/error.rs
//! Errors raised while fetching a certificate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request id must not be empty")]
    EmptyRequestId,

    /// The API answered with a non-success HTTP status.
    #[error("certificate API error: {status} {status_text}")]
    Api {
        status: u16,
        status_text: String,
        /// Message taken from the error body, when it had one
        api_message: Option<String>,
    },

    /// The API answered 2xx but flagged the request as unsuccessful.
    #[error("certificate API rejected the request: {0}")]
    Rejected(String),

    #[error("certificate data not found in response")]
    MissingData,

    #[error("invalid certificate data: {0}")]
    InvalidData(String),

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn api_message(&self) -> Option<&str> {
        match self {
            FetchError::Api { api_message, .. } => api_message.as_deref(),
            FetchError::Rejected(message) => Some(message),
            _ => None,
        }
    }

    /// Transport failures and server-side errors may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
