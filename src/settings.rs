// src/settings.rs
//! Application settings.
//!
//! Settings are layered with the `config` crate: built-in defaults first,
//! then `NFT_CERT_*` environment variables (a `.env` file is loaded into the
//! environment by the binary before this runs).
//!
//! ## Environment Variables
//! - `NFT_CERT_API_BASE_URL`: certificate API root
//! - `NFT_CERT_IPFS_GATEWAY_URL`: HTTP gateway used to display `ipfs://` images;
//!   its path must be `/ipfs` so display URLs map back for hashing
//! - `NFT_CERT_STALE_TIME_SECS`: how long a fetched certificate stays fresh
//! - `NFT_CERT_RETRY`: retries for transport errors and 5xx responses
//! - `NFT_CERT_REQUEST_TIMEOUT_SECS`: per-request HTTP timeout

use crate::api::cache::CachePolicy;
use crate::error::ConfigError;
use crate::storage::ipfs_gateway::IpfsGateway;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use serde::Deserialize;
use std::time::Duration;

/// Prefix of environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "NFT_CERT";

pub const DEFAULT_API_BASE_URL: &str = "https://epis-mint-site-backend-dev.up.railway.app";
pub const DEFAULT_IPFS_GATEWAY_URL: &str = "https://epis.mypinata.cloud/ipfs";
const DEFAULT_STALE_TIME_SECS: u64 = 5;
const DEFAULT_RETRY: u32 = 0;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub ipfs_gateway_url: String,
    pub stale_time_secs: u64,
    pub retry: u32,
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Loads settings from defaults and the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a variable cannot be parsed, a URL is
    /// not an HTTP(S) URL, or the gateway path is not `/ipfs`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(Environment::with_prefix(ENV_PREFIX)))
    }

    /// Applies defaults beneath the sources already present in `builder`.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("ipfs_gateway_url", DEFAULT_IPFS_GATEWAY_URL)?
            .set_default("stale_time_secs", DEFAULT_STALE_TIME_SECS as i64)?
            .set_default("retry", DEFAULT_RETRY as i64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .build()?
            .try_deserialize()?;
        settings.validated()
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_url("api_base_url", &self.api_base_url)?;
        self.ipfs_gateway_url = normalize_url("ipfs_gateway_url", &self.ipfs_gateway_url)?;
        let gateway = self.gateway();
        if !gateway.is_reversible() {
            return Err(ConfigError::Invalid {
                key: "ipfs_gateway_url",
                reason: format!(
                    "`{}` must end in `/ipfs` directly after the host",
                    gateway.base_url()
                ),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(self)
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            stale_time: Duration::from_secs(self.stale_time_secs),
            retry: self.retry,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn gateway(&self) -> IpfsGateway {
        IpfsGateway::new(&self.ipfs_gateway_url)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ipfs_gateway_url: DEFAULT_IPFS_GATEWAY_URL.to_string(),
            stale_time_secs: DEFAULT_STALE_TIME_SECS,
            retry: DEFAULT_RETRY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

fn normalize_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ConfigError::Invalid {
            key,
            reason: format!("`{}` is not an http(s) URL", value),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.cache_policy().stale_time, Duration::from_secs(5));
        assert_eq!(settings.cache_policy().retry, 0);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let builder = Config::builder()
            .set_override("api_base_url", "http://localhost:8080/")
            .unwrap()
            .set_override("retry", 2_i64)
            .unwrap()
            .set_override("stale_time_secs", "60")
            .unwrap();
        let settings = Settings::from_builder(builder).unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:8080");
        assert_eq!(settings.retry, 2);
        assert_eq!(settings.stale_time_secs, 60);
        assert_eq!(settings.ipfs_gateway_url, DEFAULT_IPFS_GATEWAY_URL);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let builder = Config::builder()
            .set_override("ipfs_gateway_url", "ipfs://gateway")
            .unwrap();
        let err = Settings::from_builder(builder).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ipfs_gateway_url", .. }));
    }

    #[test]
    fn test_rejects_gateway_without_ipfs_path() {
        for url in ["https://gw.example.com/content", "https://gw.example.com"] {
            let builder = Config::builder()
                .set_override("ipfs_gateway_url", url)
                .unwrap();
            let err = Settings::from_builder(builder).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: "ipfs_gateway_url", .. }));
        }
    }

    #[test]
    fn test_accepts_custom_ipfs_gateway() {
        let builder = Config::builder()
            .set_override("ipfs_gateway_url", "https://gw.example.com/ipfs/")
            .unwrap();
        let settings = Settings::from_builder(builder).unwrap();
        assert_eq!(settings.ipfs_gateway_url, "https://gw.example.com/ipfs");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let builder = Config::builder()
            .set_override("request_timeout_secs", 0_i64)
            .unwrap();
        assert!(Settings::from_builder(builder).is_err());
    }

    #[test]
    fn test_gateway_uses_configured_base() {
        let settings = Settings::default();
        assert_eq!(settings.gateway().base_url(), DEFAULT_IPFS_GATEWAY_URL);
    }
}
