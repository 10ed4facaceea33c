// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Retrieval of the signing certificate chain.

use crate::FetchError;
use url::Url;

/// Downloads the PEM certificate chain named by a request.
///
/// Implementations perform a single GET with no retries and return the full
/// response body. A non-2xx status must be reported as [`FetchError::Status`].
/// The URL has already passed [`crate::is_trusted_cert_url`].
#[allow(async_fn_in_trait)]
pub trait CertificateFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

impl<T: CertificateFetcher> CertificateFetcher for &T {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url).await
    }
}
