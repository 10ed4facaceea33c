// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Certificate downloads through the Workers `fetch` API.

use alexa_verify::{CertificateFetcher, FetchError};
use worker::{Fetch, Url};

pub(crate) struct WorkerFetcher;

impl CertificateFetcher for WorkerFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let mut resp = Fetch::Url(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status_code();
        if !(200..300).contains(&status) {
            return Err(FetchError::Status(status));
        }
        resp.bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}
