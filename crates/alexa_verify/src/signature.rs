// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Request body signatures: RSA PKCS#1 v1.5 over the SHA-1 digest of the body
//! exactly as it was received.

use crate::{AuthError, SigningCertificate};
use base64::prelude::*;
use rsa::Pkcs1v15Sign;
use sha1::{Digest, Sha1};
use std::io::Read;

/// Header naming the URL of the signing certificate chain.
pub const CERT_CHAIN_URL_HEADER: &str = "SignatureCertChainUrl";

/// Header carrying the base64-encoded body signature.
pub const SIGNATURE_HEADER: &str = "Signature";

/// The request body, buffered once so it can be both hashed and decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawBody(Vec<u8>);

impl RawBody {
    /// Reads `reader` to the end.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the reader.
    pub fn read_from<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Self(buf))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns a reader over the buffered bytes, for decoders that take one.
    #[must_use]
    pub fn reader(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for RawBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for RawBody {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// The two signature headers of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub cert_chain_url: Option<String>,
    pub signature: Option<String>,
}

impl SignatureHeaders {
    /// Picks the signature headers out of a list of `(name, value)` pairs.
    /// Names are matched case-insensitively; the first occurrence wins.
    pub fn from_pairs<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut out = Self::default();
        for (name, value) in headers {
            let name = name.as_ref();
            let slot = if name.eq_ignore_ascii_case(CERT_CHAIN_URL_HEADER) {
                &mut out.cert_chain_url
            } else if name.eq_ignore_ascii_case(SIGNATURE_HEADER) {
                &mut out.signature
            } else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_owned());
            }
        }
        out
    }
}

/// Verifies `signature_b64` over `body` with the certificate's RSA key.
///
/// # Errors
///
/// Returns [`AuthError::SignatureInvalid`] if the signature is not valid
/// base64, the certificate does not hold an RSA key, or the signature does not
/// match the body.
pub fn verify_body_signature(
    cert: &SigningCertificate,
    signature_b64: &str,
    body: &RawBody,
) -> Result<(), AuthError> {
    let signature = BASE64_STANDARD.decode(signature_b64).map_err(|e| {
        log::debug!("signature is not valid base64: {e}");
        AuthError::SignatureInvalid
    })?;
    let key = cert.rsa_public_key()?;
    let digest = Sha1::digest(body.as_bytes());
    key.verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)
        .map_err(|_| AuthError::SignatureInvalid)
}
