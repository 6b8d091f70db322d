// src/api/cache.rs
//! Request-scoped certificate cache.
//!
//! Holds certificates fetched during one viewer session, keyed by request
//! id. The cache is constructed explicitly and handed to the fetch client
//! together with its [`CachePolicy`]; nothing about it is global.

use crate::models::certificate::Certificate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Freshness and retry behaviour for certificate fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long a fetched certificate is served without refetching
    pub stale_time: Duration,
    /// Extra attempts after a retryable failure
    pub retry: u32,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy {
            stale_time: Duration::from_secs(5),
            retry: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    certificate: Certificate,
}

/// In-memory certificate cache.
///
/// # Note
/// Entries are never evicted; a stale entry is simply ignored and
/// overwritten by the next successful fetch.
#[derive(Debug)]
pub struct CertificateCache {
    policy: CachePolicy,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl CertificateCache {
    pub fn new(policy: CachePolicy) -> Self {
        CertificateCache {
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached certificate if it is still fresh.
    pub fn get_fresh(&self, request_id: &str) -> Option<Certificate> {
        self.get_fresh_at(request_id, Instant::now())
    }

    /// Same as [`get_fresh`](Self::get_fresh), evaluated at `now`.
    ///
    /// An entry is fresh while its age is strictly below `stale_time`, so a
    /// zero stale time disables caching.
    pub fn get_fresh_at(&self, request_id: &str, now: Instant) -> Option<Certificate> {
        let entries = self.entries();
        let entry = entries.get(request_id)?;
        if now.saturating_duration_since(entry.fetched_at) < self.policy.stale_time {
            Some(entry.certificate.clone())
        } else {
            None
        }
    }

    /// Stores a certificate, overwriting any previous entry for the id.
    pub fn store(&self, request_id: &str, certificate: Certificate) {
        self.store_at(request_id, certificate, Instant::now());
    }

    pub fn store_at(&self, request_id: &str, certificate: Certificate, fetched_at: Instant) {
        self.entries().insert(
            request_id.to_string(),
            CacheEntry {
                fetched_at,
                certificate,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CertificateCache {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_certificate(request_id: &str) -> Certificate {
        Certificate {
            request_id: request_id.to_string(),
            token_id: "1".to_string(),
            title: "Cert".to_string(),
            description: String::new(),
            image_url: String::new(),
            stored_hash: String::new(),
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
            expired_at: Utc.timestamp_opt(0, 0).unwrap(),
            files: vec![],
        }
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let cache = CertificateCache::default();
        let start = Instant::now();
        cache.store_at("req-1", create_test_certificate("req-1"), start);

        let hit = cache.get_fresh_at("req-1", start + Duration::from_secs(4));
        assert_eq!(hit.unwrap().request_id, "req-1");
    }

    #[test]
    fn test_stale_entry_is_ignored() {
        let cache = CertificateCache::default();
        let start = Instant::now();
        cache.store_at("req-1", create_test_certificate("req-1"), start);

        assert!(cache.get_fresh_at("req-1", start + Duration::from_secs(5)).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_stale_time_disables_caching() {
        let cache = CertificateCache::new(CachePolicy {
            stale_time: Duration::ZERO,
            retry: 0,
        });
        let start = Instant::now();
        cache.store_at("req-1", create_test_certificate("req-1"), start);
        assert!(cache.get_fresh_at("req-1", start).is_none());
    }

    #[test]
    fn test_missing_entry() {
        let cache = CertificateCache::default();
        assert!(cache.get_fresh("unknown").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_overwrites() {
        let cache = CertificateCache::default();
        cache.store("req-1", create_test_certificate("old"));
        cache.store("req-1", create_test_certificate("new"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_fresh("req-1").unwrap().request_id, "new");
    }
}
