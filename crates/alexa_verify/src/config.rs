// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Verification policy. The defaults are the values the Alexa platform uses;
//! tests and staging deployments override them to point at their own
//! certificate host and signing domain.

use serde::Deserialize;

/// Hosts allowed to serve the signing certificate chain. URLs are normalised
/// before matching, so `s3.amazonaws.com:443` matches `s3.amazonaws.com`. A
/// non-default port has to be listed as `host:port`.
pub const DEFAULT_CERT_HOSTS: [&str; 1] = ["s3.amazonaws.com"];

/// Path every signing certificate URL has to start with.
pub const DEFAULT_CERT_PATH_PREFIX: &str = "/echo.api/";

/// Subject alternative name the signing certificate has to carry.
pub const DEFAULT_SIGNING_DOMAIN: &str = "echo-api.amazon.com";

/// Maximum age of a request, measured from its `timestamp` field.
pub const DEFAULT_MAX_REQUEST_AGE_SECS: u64 = 150;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct VerifierConfig {
    pub trusted_cert_hosts: Vec<String>,
    pub trusted_cert_path_prefix: String,
    pub signing_domain: String,
    pub max_request_age_secs: u64,
    /// How long a fetched certificate may be reused for the same URL. `None`
    /// fetches the certificate on every request.
    pub cert_cache_ttl_secs: Option<u64>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            trusted_cert_hosts: DEFAULT_CERT_HOSTS.map(str::to_owned).to_vec(),
            trusted_cert_path_prefix: DEFAULT_CERT_PATH_PREFIX.to_owned(),
            signing_domain: DEFAULT_SIGNING_DOMAIN.to_owned(),
            max_request_age_secs: DEFAULT_MAX_REQUEST_AGE_SECS,
            cert_cache_ttl_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: VerifierConfig =
            serde_json::from_str(r#"{"cert_cache_ttl_secs": 3600}"#).unwrap();
        assert_eq!(config.cert_cache_ttl_secs, Some(3600));
        assert_eq!(config.signing_domain, DEFAULT_SIGNING_DOMAIN);
        assert_eq!(config.max_request_age_secs, 150);
        assert_eq!(config.trusted_cert_hosts, vec!["s3.amazonaws.com"]);
    }
}
