// src/api/client.rs
//! Certificate fetch client.
//!
//! Retrieves a certificate from the certificate API and normalizes it for
//! display:
//! - `ipfs://` image references are rewritten to the configured HTTP gateway
//! - Unix-second timestamps become UTC instants
//! - A missing file list becomes an empty one
//!
//! # Endpoint
//! `GET {api_base_url}/certificate?requestId={id}`
//!
//! # Response envelope
//! `{ "success": bool, "message": string, "data": { ... } }`

use crate::api::cache::CertificateCache;
use crate::api::error::FetchError;
use crate::models::certificate::{Certificate, FileRecord};
use crate::settings::Settings;
use crate::storage::ipfs_gateway::IpfsGateway;
use crate::utils::serialization::deserialize;
use chrono::{DateTime, TimeZone, Utc};
use log::{debug, error, info, warn};
use serde::Deserialize;

/// Wire shape of the certificate API response.
#[derive(Deserialize, Debug)]
struct ApiEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<ApiCertificate>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiCertificate {
    request_id: String,
    token_id: String,
    title: String,
    description: String,
    image_url: String,
    hash: String,
    /// Unix timestamp (seconds)
    expired_at: i64,
    /// Unix timestamp (seconds)
    created_at: i64,
    #[serde(default)]
    files: Option<Vec<FileRecord>>,
}

/// HTTP client for the certificate API.
///
/// Owns the request-scoped [`CertificateCache`] it was constructed with.
pub struct CertificateClient {
    http: reqwest::Client,
    api_base_url: String,
    gateway: IpfsGateway,
    cache: CertificateCache,
}

impl CertificateClient {
    /// Creates a client from settings and an explicitly constructed cache.
    ///
    /// # Arguments
    /// * `settings` - API root, gateway and timeout
    /// * `cache` - Cache whose policy (freshness, retries) governs fetches
    ///
    /// # Errors
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be built.
    pub fn new(settings: &Settings, cache: CertificateCache) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Ok(CertificateClient {
            http,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            gateway: settings.gateway(),
            cache,
        })
    }

    pub fn cache(&self) -> &CertificateCache {
        &self.cache
    }

    /// Fetches a certificate by request id.
    ///
    /// Fresh cache entries are returned without a request. Otherwise the API
    /// is queried, retrying retryable failures up to the cache policy's retry
    /// count.
    ///
    /// # Errors
    /// - [`FetchError::EmptyRequestId`] for a blank id
    /// - [`FetchError::Api`] for non-2xx responses
    /// - [`FetchError::Rejected`] when the envelope reports `success: false`
    /// - [`FetchError::MissingData`] when the envelope has no data
    /// - [`FetchError::InvalidData`] for undecodable bodies or timestamps
    /// - [`FetchError::Transport`] for network failures
    pub async fn fetch_certificate(&self, request_id: &str) -> Result<Certificate, FetchError> {
        let request_id = request_id.trim();
        if request_id.is_empty() {
            return Err(FetchError::EmptyRequestId);
        }

        if let Some(certificate) = self.cache.get_fresh(request_id) {
            debug!("serving certificate {} from cache", request_id);
            return Ok(certificate);
        }

        let retries = self.cache.policy().retry;
        let mut attempt = 0;
        loop {
            match self.fetch_once(request_id).await {
                Ok(certificate) => {
                    self.cache.store(request_id, certificate.clone());
                    return Ok(certificate);
                }
                Err(e) if e.is_retryable() && attempt < retries => {
                    attempt += 1;
                    warn!(
                        "fetching certificate {} failed ({}), retry {}/{}",
                        request_id, e, attempt, retries
                    );
                }
                Err(e) => {
                    error!("failed to fetch certificate {}: {}", request_id, e);
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_once(&self, request_id: &str) -> Result<Certificate, FetchError> {
        let url = format!("{}/certificate", self.api_base_url);
        info!("fetching certificate {}", request_id);

        let response = self
            .http
            .get(&url)
            .query(&[("requestId", request_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The error body is optional; an unreadable one just means no message.
            let api_message = response
                .text()
                .await
                .ok()
                .and_then(|body| extract_api_message(&body));
            return Err(FetchError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                api_message,
            });
        }

        let body = response.text().await?;
        let envelope: ApiEnvelope =
            deserialize(&body).map_err(|e| FetchError::InvalidData(e.to_string()))?;
        self.normalize(envelope)
    }

    fn normalize(&self, envelope: ApiEnvelope) -> Result<Certificate, FetchError> {
        if !envelope.success {
            let message = envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(FetchError::Rejected(message));
        }

        let data = envelope.data.ok_or(FetchError::MissingData)?;

        Ok(Certificate {
            request_id: data.request_id,
            token_id: data.token_id,
            title: data.title,
            description: data.description,
            image_url: self.gateway.to_gateway_url(&data.image_url),
            stored_hash: data.hash,
            created_at: from_unix_seconds("createdAt", data.created_at)?,
            expired_at: from_unix_seconds("expiredAt", data.expired_at)?,
            files: data.files.unwrap_or_default(),
        })
    }
}

fn from_unix_seconds(field: &str, seconds: i64) -> Result<DateTime<Utc>, FetchError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| FetchError::InvalidData(format!("{} out of range: {}", field, seconds)))
}

/// Picks the first non-empty `message`, `error` or `description` string from
/// a JSON error body.
fn extract_api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = deserialize(body).ok()?;
    ["message", "error", "description"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_client() -> CertificateClient {
        CertificateClient::new(&Settings::default(), CertificateCache::default()).unwrap()
    }

    fn envelope(json: &str) -> ApiEnvelope {
        deserialize(json).unwrap()
    }

    #[test]
    fn test_extract_api_message_priority() {
        assert_eq!(
            extract_api_message(r#"{"error":"bad","message":"first"}"#).as_deref(),
            Some("first")
        );
        assert_eq!(
            extract_api_message(r#"{"message":"","description":"last"}"#).as_deref(),
            Some("last")
        );
        assert_eq!(extract_api_message(r#"{"code":1}"#), None);
        assert_eq!(extract_api_message("<html>oops</html>"), None);
    }

    #[test]
    fn test_normalize_rewrites_image_and_timestamps() {
        let client = create_test_client();
        let certificate = client
            .normalize(envelope(
                r#"{"success":true,"message":"ok","data":{
                    "requestId":"req-1","tokenId":"12","title":"T","description":"D",
                    "imageUrl":"ipfs://QmImg","hash":"abc",
                    "expiredAt":1800000000,"createdAt":1700000000}}"#,
            ))
            .unwrap();

        assert_eq!(certificate.image_url, "https://epis.mypinata.cloud/ipfs/QmImg");
        assert_eq!(certificate.created_at.timestamp(), 1_700_000_000);
        assert_eq!(certificate.expired_at.timestamp(), 1_800_000_000);
        assert_eq!(certificate.stored_hash, "abc");
        assert!(certificate.files.is_empty());
    }

    #[test]
    fn test_normalize_null_files() {
        let client = create_test_client();
        let certificate = client
            .normalize(envelope(
                r#"{"success":true,"data":{
                    "requestId":"r","tokenId":"1","title":"T","description":"D",
                    "imageUrl":"https://example.com/a.png","hash":"h",
                    "expiredAt":0,"createdAt":0,"files":null}}"#,
            ))
            .unwrap();
        assert!(certificate.files.is_empty());
        assert_eq!(certificate.image_url, "https://example.com/a.png");
    }

    #[test]
    fn test_normalize_rejected_envelope() {
        let client = create_test_client();
        let err = client
            .normalize(envelope(r#"{"success":false,"message":"denied"}"#))
            .unwrap_err();
        assert!(matches!(err, FetchError::Rejected(ref m) if m == "denied"));

        let err = client.normalize(envelope(r#"{"success":false}"#)).unwrap_err();
        assert!(matches!(err, FetchError::Rejected(ref m) if m == "unknown error"));
    }

    #[test]
    fn test_normalize_missing_data() {
        let client = create_test_client();
        let err = client.normalize(envelope(r#"{"success":true,"message":"ok"}"#)).unwrap_err();
        assert!(matches!(err, FetchError::MissingData));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert!(matches!(
            from_unix_seconds("expiredAt", i64::MAX),
            Err(FetchError::InvalidData(_))
        ));
    }

    #[test]
    fn test_blank_request_id_is_rejected() {
        let client = create_test_client();
        let err = tokio_test::block_on(client.fetch_certificate("   ")).unwrap_err();
        assert!(matches!(err, FetchError::EmptyRequestId));
    }
}
