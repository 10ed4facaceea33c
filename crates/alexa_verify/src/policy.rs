// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Allow-list for the `SignatureCertChainUrl` header.
//!
//! This runs before the certificate is fetched, so a request can never make us
//! contact a host outside the allow-list.

use crate::VerifierConfig;
use url::Url;

/// Returns whether `cert_url` may be fetched under `config`.
///
/// The URL must use `https`, name one of the trusted hosts exactly, and have a
/// path starting with the trusted prefix. Dot segments are resolved before the
/// prefix comparison, so `/echo.api/../x` does not pass.
#[must_use]
pub fn is_trusted_cert_url(cert_url: &str, config: &VerifierConfig) -> bool {
    let Ok(url) = Url::parse(cert_url) else {
        return false;
    };

    if url.scheme() != "https" {
        return false;
    }

    // `Url` drops the scheme's default port, so an explicit `:443` shows up here
    // as no port at all and a bare host entry covers both spellings.
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_owned(),
        (None, _) => return false,
    };
    if !config.trusted_cert_hosts.iter().any(|h| *h == host) {
        return false;
    }

    url.path().starts_with(&config.trusted_cert_path_prefix)
}
