// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Fixtures shared by the unit tests.
//!
//! The certificates under `tests/` are issued by a throwaway test root. All of
//! them except `expired.pem` are valid at [`NOW`].

use crate::{checks::REQUEST_TIMESTAMP_FORMAT, CertificateFetcher, FetchError};
use base64::prelude::*;
use rsa::{pkcs8::DecodePrivateKey, Pkcs1v15Sign, RsaPrivateKey};
use sha1::{Digest, Sha1};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};
use url::Url;

/// 2027-01-01T00:00:00Z
pub(crate) const NOW: u64 = 1_798_761_600;

/// Leaf for `echo-api.amazon.com` followed by the test root.
pub(crate) const ECHO_API_CHAIN: &[u8] = include_bytes!("../tests/echo-api-chain.pem");
pub(crate) const ECHO_API_KEY: &str = include_str!("../tests/echo-api-key.pem");
/// The `ECHO_API_CHAIN` leaf alone, wrapped at 76 columns with CRLF endings.
pub(crate) const ECHO_API_76_COLUMNS: &[u8] = include_bytes!("../tests/echo-api-76col.pem");
pub(crate) const TEST_ROOT_CA: &[u8] = include_bytes!("../tests/test-root-ca.pem");
/// `echo-api.amazon.com` leaf followed by its issuer, an intermediate with
/// path length 0 under the test root.
pub(crate) const INTERMEDIATE_CHAIN: &[u8] = include_bytes!("../tests/intermediate-chain.pem");
pub(crate) const INTERMEDIATE_CHAIN_KEY: &str =
    include_str!("../tests/intermediate-chain-key.pem");
/// The `INTERMEDIATE_CHAIN` leaf followed by a different intermediate.
pub(crate) const WRONG_INTERMEDIATE_CHAIN: &[u8] =
    include_bytes!("../tests/wrong-intermediate-chain.pem");
/// Leaf followed by its issuer, which is marked `CA:FALSE`.
pub(crate) const NON_CA_INTERMEDIATE_CHAIN: &[u8] =
    include_bytes!("../tests/non-ca-intermediate-chain.pem");
/// Leaf, sub-intermediate, then the path length 0 intermediate.
pub(crate) const PATH_LENGTH_CHAIN: &[u8] = include_bytes!("../tests/path-length-chain.pem");
/// Leaf for `example.com`, issued by the test root.
pub(crate) const OTHER_NAME_CERT: &[u8] = include_bytes!("../tests/other-name.pem");
pub(crate) const OTHER_NAME_KEY: &str = include_str!("../tests/other-name-key.pem");
/// P-256 leaf for `echo-api.amazon.com`, issued by the test root.
pub(crate) const EC_CERT: &[u8] = include_bytes!("../tests/ec-echo-api.pem");
/// Self-signed, valid during 2020 only.
pub(crate) const EXPIRED_CERT: &[u8] = include_bytes!("../tests/expired.pem");
pub(crate) const EXPIRED_KEY: &str = include_str!("../tests/expired-key.pem");
/// Self-signed `echo-api.amazon.com` leaf, not under the test root.
pub(crate) const SELF_SIGNED_CERT: &[u8] = include_bytes!("../tests/self-signed.pem");
pub(crate) const SELF_SIGNED_KEY: &str = include_str!("../tests/self-signed-key.pem");

pub(crate) const CERT_URL: &str = "https://s3.amazonaws.com/echo.api/echo-api-cert.pem";
pub(crate) const APP_ID: &str = "amzn1.echo-sdk-ams.app.000000-d0ed-0000-ad00-000000d00ebe";

/// Signs `body` the way the platform does.
pub(crate) fn sign_body(key_pem: &str, body: &[u8]) -> String {
    let key = RsaPrivateKey::from_pkcs8_pem(key_pem).unwrap();
    let signature = key
        .sign(Pkcs1v15Sign::new::<Sha1>(), &Sha1::digest(body))
        .unwrap();
    BASE64_STANDARD.encode(signature)
}

pub(crate) fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .unwrap()
        .format(REQUEST_TIMESTAMP_FORMAT)
        .to_string()
}

/// A launch request for `application_id`, sent at `timestamp`.
pub(crate) fn launch_request(application_id: &str, timestamp: &str) -> Vec<u8> {
    serde_json::to_vec_pretty(&serde_json::json!({
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": "amzn1.echo-api.session.0000000-0000-0000-0000-00000000000",
            "application": { "applicationId": application_id },
            "attributes": {},
            "user": { "userId": "amzn1.account.AM3B00000000000000000000000" }
        },
        "request": {
            "type": "LaunchRequest",
            "requestId": "amzn1.echo-api.request.0000000-0000-0000-0000-00000000000",
            "timestamp": timestamp
        }
    }))
    .unwrap()
}

/// Serves fixed responses by URL and counts the fetches it sees.
#[derive(Default)]
pub(crate) struct MockFetcher {
    responses: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl MockFetcher {
    pub(crate) fn with(url: &str, body: &[u8]) -> Self {
        let mut fetcher = Self::default();
        fetcher.responses.insert(url.to_owned(), body.to_vec());
        fetcher
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CertificateFetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(url.as_str())
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}
