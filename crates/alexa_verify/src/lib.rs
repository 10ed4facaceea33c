// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Authentication of Alexa skill requests.
//!
//! Every request the platform sends to a skill is signed. Before the body is
//! handed to any skill logic, [`RequestAuthenticator::authenticate`] runs the
//! following gates and stops at the first failure:
//!
//! 1. The `SignatureCertChainUrl` header must name an allowed location
//!    ([`is_trusted_cert_url`]). Nothing is fetched otherwise.
//! 2. The certificate chain is downloaded with a [`CertificateFetcher`].
//! 3. The first certificate must parse, be currently valid, and carry the
//!    signing domain as a subject alternative name ([`SigningCertificate`]).
//! 4. The `Signature` header must be an RSA PKCS#1 v1.5 signature over the
//!    SHA-1 digest of the raw body ([`verify_body_signature`]).
//! 5. The decoded envelope must be fresh ([`check_request_timestamp`]) and
//!    addressed to the expected skill ([`check_application_id`]).
//!
//! Two optional behaviours can be switched on: a chain check against pinned
//! roots ([`RequestAuthenticator::with_trusted_roots`]), and a per-URL
//! certificate cache ([`VerifierConfig::cert_cache_ttl_secs`]).

use alexa_api::RequestEnvelope;
use std::sync::Arc;
use url::Url;

mod cache;
mod cert;
mod chain;
mod checks;
mod config;
mod error;
mod fetch;
mod policy;
mod signature;
#[cfg(test)]
mod test_utils;

use cache::CertificateCache;
pub use cert::*;
pub use chain::*;
pub use checks::*;
pub use config::*;
pub use error::*;
pub use fetch::*;
pub use policy::*;
pub use signature::*;

/// Runs the authentication gates for one skill.
///
/// An authenticator holds no per-request state and can be shared between
/// concurrent requests.
pub struct RequestAuthenticator<F> {
    config: VerifierConfig,
    fetcher: F,
    trusted_roots: Option<CertPool>,
    cache: Option<CertificateCache>,
}

impl<F: CertificateFetcher> RequestAuthenticator<F> {
    pub fn new(config: VerifierConfig, fetcher: F) -> Self {
        let cache = config
            .cert_cache_ttl_secs
            .filter(|&ttl| ttl > 0)
            .map(CertificateCache::new);
        Self {
            config,
            fetcher,
            trusted_roots: None,
            cache,
        }
    }

    /// Additionally requires the signing certificate to chain to one of
    /// `roots`, using the certificates that follow it in the fetched file.
    #[must_use]
    pub fn with_trusted_roots(mut self, roots: CertPool) -> Self {
        self.trusted_roots = Some(roots);
        self
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Authenticates a request and returns its decoded envelope.
    ///
    /// `body` is borrowed, so the caller still holds the exact bytes that were
    /// verified, whatever the outcome. An empty `expected_application_id`
    /// accepts requests for any skill. `now_secs` is the current time in
    /// seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] of the first gate that fails.
    pub async fn authenticate(
        &self,
        headers: &SignatureHeaders,
        body: &RawBody,
        expected_application_id: &str,
        now_secs: u64,
    ) -> Result<RequestEnvelope, AuthError> {
        let result = self
            .run_gates(headers, body, expected_application_id, now_secs)
            .await;
        if let Err(e) = &result {
            log::info!("rejected skill request: {e}");
        }
        result
    }

    async fn run_gates(
        &self,
        headers: &SignatureHeaders,
        body: &RawBody,
        expected_application_id: &str,
        now_secs: u64,
    ) -> Result<RequestEnvelope, AuthError> {
        let cert_url = headers.cert_chain_url.as_deref().unwrap_or_default();
        if !is_trusted_cert_url(cert_url, &self.config) {
            return Err(AuthError::InvalidCertificateURL);
        }
        let url = Url::parse(cert_url).map_err(|_| AuthError::InvalidCertificateURL)?;

        let cert = self.signing_certificate(&url, now_secs).await?;

        verify_body_signature(
            &cert,
            headers.signature.as_deref().unwrap_or_default(),
            body,
        )?;

        let envelope = RequestEnvelope::from_slice(body.as_bytes())
            .map_err(|e| AuthError::MalformedEnvelope(e.to_string()))?;
        check_request_timestamp(
            &envelope.request.timestamp,
            now_secs,
            self.config.max_request_age_secs,
        )?;
        check_application_id(expected_application_id, envelope.application_id())?;

        log::debug!(
            "authenticated {} {}",
            envelope.request_type(),
            envelope.request.request_id
        );
        Ok(envelope)
    }

    /// Returns the validated signing certificate at `url`, from the cache when
    /// possible. The validity and name checks run on every call.
    async fn signing_certificate(
        &self,
        url: &Url,
        now_secs: u64,
    ) -> Result<Arc<SigningCertificate>, AuthError> {
        let cached = self
            .cache
            .as_ref()
            .and_then(|cache| cache.get(url.as_str(), now_secs));

        let from_cache = cached.is_some();
        let cert = if let Some(cert) = cached {
            log::debug!("using cached certificate for {url}");
            cert
        } else {
            let pem = self.fetcher.fetch(url).await?;
            let (cert, rest) = SigningCertificate::from_pem_chain(&pem)?;
            if let Some(roots) = &self.trusted_roots {
                verify_chain(cert.certificate(), rest, roots)?;
            }
            Arc::new(cert)
        };

        cert.check_validity(now_secs)?;
        cert.check_name(&self.config.signing_domain)?;

        if let Some(cache) = self.cache.as_ref().filter(|_| !from_cache) {
            cache.insert(url.as_str(), Arc::clone(&cert), now_secs);
        }
        Ok(cert)
    }
}
