// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Time-bounded cache of parsed signing certificates, keyed by URL.
//!
//! Only parsing, and the chain check when one is configured, are skipped on a
//! hit. The caller still runs the validity and name checks on every request.

use crate::SigningCertificate;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

struct CacheEntry {
    inserted_at: u64,
    cert: Arc<SigningCertificate>,
}

pub(crate) struct CertificateCache {
    ttl_secs: u64,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl CertificateCache {
    pub(crate) fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the certificate stored for `url` unless it is older than the TTL.
    pub(crate) fn get(&self, url: &str, now_secs: u64) -> Option<Arc<SigningCertificate>> {
        let mut entries = self.entries.lock();
        let found = entries.get(url).map(|entry| {
            (
                now_secs.saturating_sub(entry.inserted_at) < self.ttl_secs,
                Arc::clone(&entry.cert),
            )
        });
        match found {
            Some((true, cert)) => Some(cert),
            Some((false, _)) => {
                entries.remove(url);
                None
            }
            None => None,
        }
    }

    pub(crate) fn insert(&self, url: &str, cert: Arc<SigningCertificate>, now_secs: u64) {
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| now_secs.saturating_sub(entry.inserted_at) < self.ttl_secs);
        entries.insert(
            url.to_owned(),
            CacheEntry {
                inserted_at: now_secs,
                cert,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn entries_expire() {
        let cache = CertificateCache::new(60);
        let (cert, _) = SigningCertificate::from_pem_chain(ECHO_API_CHAIN).unwrap();
        let url = "https://s3.amazonaws.com/echo.api/cert.pem";

        assert!(cache.get(url, NOW).is_none());
        cache.insert(url, Arc::new(cert), NOW);
        assert!(cache.get(url, NOW).is_some());
        assert!(cache.get(url, NOW + 59).is_some());
        assert!(cache.get("https://s3.amazonaws.com/echo.api/other.pem", NOW).is_none());
        assert!(cache.get(url, NOW + 60).is_none());
        // Expired entries are dropped on lookup.
        assert!(cache.get(url, NOW).is_none());
    }
}
