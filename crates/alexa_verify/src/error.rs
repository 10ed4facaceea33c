// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

use thiserror::Error;

/// Reasons a request is rejected. Every variant is an expected outcome of
/// hostile or stale input, and callers should answer it with an error status
/// without running any skill handler.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid certificate URL")]
    InvalidCertificateURL,

    #[error("could not fetch certificate: {0}")]
    CertificateFetchFailed(#[from] FetchError),

    #[error("failed decoding PEM")]
    MalformedPEM,

    #[error("could not parse certificate: {0}")]
    MalformedCertificate(String),

    #[error("amazon certificate expired")]
    CertificateExpired,

    #[error("certificate name not found")]
    CertificateNameMismatch,

    #[error("untrusted certificate chain: {0}")]
    UntrustedCertificateChain(#[from] ChainError),

    #[error("invalid signature")]
    SignatureInvalid,

    #[error("malformed request envelope: {0}")]
    MalformedEnvelope(String),

    #[error("request timestamp has expired")]
    RequestExpired,

    #[error("invalid application ID")]
    ApplicationIDMismatch,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
}

#[derive(Error, Debug)]
pub enum ChainError {
    #[error(transparent)]
    Der(#[from] der::Error),
    #[error("invalid link in chain")]
    InvalidLinkInChain,
    #[error("missing or invalid basic constraints")]
    InvalidBasicConstraints,
    #[error("mismatching signature algorithm identifier")]
    MismatchingSigAlg,
    #[error("failed decoding intermediate PEM")]
    MalformedIntermediate,
    #[error("issuer not in root store: {to_verify_issuer}")]
    NoPathToTrustedRoot { to_verify_issuer: String },
}
