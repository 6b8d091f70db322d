// src/storage/ipfs_gateway.rs
//! IPFS reference handling.
//!
//! Certificates reference their image by content address (`ipfs://<CID>`).
//! For display the reference is rewritten to an HTTP gateway URL, and for
//! hashing it must be rewritten back, independent of which gateway served it.
//!
//! # Forms
//! - Content-addressed: `ipfs://<CID>`
//! - Gateway: `https://<gateway-host>/ipfs/<CID>` (or `http://`)

use std::borrow::Cow;

/// URI scheme prefix of content-addressed references.
pub const IPFS_SCHEME: &str = "ipfs://";

const GATEWAY_PATH_PREFIX: &str = "ipfs/";

const SAMPLE_CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

/// An HTTP gateway used to display content-addressed resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpfsGateway {
    /// Gateway base including the `/ipfs` path, without trailing slash
    base_url: String,
}

impl IpfsGateway {
    /// Creates a gateway from its base URL.
    ///
    /// # Arguments
    /// * `base_url` - e.g. `https://epis.mypinata.cloud/ipfs` (trailing slash optional)
    pub fn new(base_url: &str) -> Self {
        IpfsGateway {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Rewrites `ipfs://<CID>` to `<base_url>/<CID>`.
    ///
    /// Any other URL is returned unchanged.
    pub fn to_gateway_url(&self, url: &str) -> String {
        match url.strip_prefix(IPFS_SCHEME) {
            Some(cid) => format!("{}/{}", self.base_url, cid),
            None => url.to_string(),
        }
    }

    /// Whether URLs produced by [`to_gateway_url`](Self::to_gateway_url)
    /// map back to the same `ipfs://` reference.
    ///
    /// Only gateways whose path is exactly `/ipfs` do; hashing relies on it.
    pub fn is_reversible(&self) -> bool {
        let reference = format!("{}{}", IPFS_SCHEME, SAMPLE_CID);
        to_content_address(&self.to_gateway_url(&reference)) == reference
    }
}

/// Rewrites a gateway URL back to its `ipfs://<CID>` form.
///
/// Matches `http(s)://<host>/ipfs/<CID>` for any non-empty host and CID.
/// Everything after `/ipfs/` is kept as the CID part, so sub-paths survive
/// the round trip. Other URLs are returned unchanged.
///
/// # Example
/// ```
/// use nft_cert_viewer::storage::ipfs_gateway::to_content_address;
///
/// assert_eq!(
///     to_content_address("https://epis.mypinata.cloud/ipfs/Qm123"),
///     "ipfs://Qm123"
/// );
/// assert_eq!(to_content_address("https://example.com/a.png"), "https://example.com/a.png");
/// ```
pub fn to_content_address(url: &str) -> Cow<'_, str> {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return Cow::Borrowed(url);
    };

    let Some((host, path)) = rest.split_once('/') else {
        return Cow::Borrowed(url);
    };
    if host.is_empty() {
        return Cow::Borrowed(url);
    }

    match path.strip_prefix(GATEWAY_PATH_PREFIX) {
        Some(cid) if !cid.is_empty() => Cow::Owned(format!("{}{}", IPFS_SCHEME, cid)),
        _ => Cow::Borrowed(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_url_from_content_address() {
        let gateway = IpfsGateway::new("https://epis.mypinata.cloud/ipfs/");
        assert_eq!(gateway.base_url(), "https://epis.mypinata.cloud/ipfs");
        assert_eq!(
            gateway.to_gateway_url("ipfs://QmAbc"),
            "https://epis.mypinata.cloud/ipfs/QmAbc"
        );
        assert_eq!(
            gateway.to_gateway_url("https://example.com/a.png"),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn test_content_address_from_any_gateway() {
        assert_eq!(to_content_address("https://epis.mypinata.cloud/ipfs/Qm123"), "ipfs://Qm123");
        assert_eq!(to_content_address("https://ipfs.io/ipfs/bafy/img.png"), "ipfs://bafy/img.png");
        assert_eq!(to_content_address("http://localhost:8080/ipfs/Qm1"), "ipfs://Qm1");
    }

    #[test]
    fn test_non_gateway_urls_pass_through() {
        for url in [
            "ipfs://Qm123",
            "https://example.com/a.png",
            "https://example.com/ipfs/",
            "https:///ipfs/Qm123",
            "https://example.com/files/ipfs/Qm123",
            "./placeholder-image.jpg",
            "",
        ] {
            assert_eq!(to_content_address(url), url);
        }
    }

    #[test]
    fn test_reversible_gateways() {
        assert!(IpfsGateway::new("https://epis.mypinata.cloud/ipfs").is_reversible());
        assert!(IpfsGateway::new("http://localhost:8080/ipfs/").is_reversible());
        assert!(!IpfsGateway::new("https://gw.example.com/content").is_reversible());
        assert!(!IpfsGateway::new("https://gw.example.com/mirror/ipfs").is_reversible());
        assert!(!IpfsGateway::new("https://gw.example.com").is_reversible());
    }

    #[test]
    fn test_round_trip_through_gateway() {
        let gateway = IpfsGateway::new("https://epis.mypinata.cloud/ipfs");
        let display = gateway.to_gateway_url("ipfs://QmRoundTrip");
        assert_eq!(to_content_address(&display), "ipfs://QmRoundTrip");
    }
}
