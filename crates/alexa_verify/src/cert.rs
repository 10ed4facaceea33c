// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Parsing and per-request checks of the signing certificate.

use crate::AuthError;
use base64::prelude::*;
use der::{Decode, Encode};
use rsa::{pkcs8::DecodePublicKey, RsaPublicKey};
use x509_cert::{
    ext::pkix::{name::GeneralName, SubjectAltName},
    Certificate,
};

const BEGIN_BOUNDARY: &[u8] = b"-----BEGIN ";
const BOUNDARY_DASHES: &[u8] = b"-----";
const END_CERTIFICATE_BOUNDARY: &[u8] = b"-----END CERTIFICATE-----";
const CERTIFICATE_LABEL: &[u8] = b"CERTIFICATE";

/// The leaf certificate of a fetched signing chain.
#[derive(Clone, Debug)]
pub struct SigningCertificate {
    cert: Certificate,
}

impl SigningCertificate {
    /// Parses the first PEM block of `input` as an X.509 certificate, and
    /// returns it together with the bytes following that block. Any text
    /// before the first block is ignored, and the base64 body may be wrapped
    /// at any width.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedPEM`] if no non-empty `CERTIFICATE` block
    /// can be decoded, and [`AuthError::MalformedCertificate`] if the block is
    /// not a valid certificate.
    pub fn from_pem_chain(input: &[u8]) -> Result<(Self, &[u8]), AuthError> {
        let (der, rest) = next_pem_certificate(input).ok_or(AuthError::MalformedPEM)?;
        if der.is_empty() {
            return Err(AuthError::MalformedPEM);
        }
        let cert = Certificate::from_der(&der)
            .map_err(|e| AuthError::MalformedCertificate(e.to_string()))?;
        Ok((Self { cert }, rest))
    }

    #[must_use]
    pub fn certificate(&self) -> &Certificate {
        &self.cert
    }

    /// Checks that `now_secs` lies within the certificate's validity window.
    /// Both boundary seconds are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CertificateExpired`] outside the window.
    pub fn check_validity(&self, now_secs: u64) -> Result<(), AuthError> {
        let validity = &self.cert.tbs_certificate.validity;
        let not_before = validity.not_before.to_unix_duration().as_secs();
        let not_after = validity.not_after.to_unix_duration().as_secs();
        if now_secs < not_before || now_secs > not_after {
            return Err(AuthError::CertificateExpired);
        }
        Ok(())
    }

    /// Checks that `domain` is one of the certificate's DNS subject alternative
    /// names.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CertificateNameMismatch`] if it is not, or if the
    /// extension cannot be read.
    pub fn check_name(&self, domain: &str) -> Result<(), AuthError> {
        let names = match self.cert.tbs_certificate.get::<SubjectAltName>() {
            Ok(Some((_, san))) => san.0,
            Ok(None) => return Err(AuthError::CertificateNameMismatch),
            Err(e) => {
                log::debug!("unreadable subject alternative names: {e}");
                return Err(AuthError::CertificateNameMismatch);
            }
        };
        if names
            .iter()
            .any(|name| matches!(name, GeneralName::DnsName(dns) if dns.as_str() == domain))
        {
            Ok(())
        } else {
            Err(AuthError::CertificateNameMismatch)
        }
    }

    /// Returns the certificate's RSA public key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SignatureInvalid`] for any other kind of key, since
    /// nothing else can verify a request signature.
    pub fn rsa_public_key(&self) -> Result<RsaPublicKey, AuthError> {
        let spki_der = self
            .cert
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|_| AuthError::SignatureInvalid)?;
        RsaPublicKey::from_public_key_der(&spki_der).map_err(|e| {
            log::debug!("signing certificate does not hold an RSA key: {e}");
            AuthError::SignatureInvalid
        })
    }
}

/// Decodes the first PEM block of `input`, which must be labelled
/// `CERTIFICATE`, and returns its DER bytes along with the input that follows
/// `-----END CERTIFICATE-----`. Whitespace inside the base64 body is ignored,
/// so any line width and either line ending is accepted.
pub(crate) fn next_pem_certificate(input: &[u8]) -> Option<(Vec<u8>, &[u8])> {
    let label_start = find(input, BEGIN_BOUNDARY)? + BEGIN_BOUNDARY.len();
    let label_len = find(&input[label_start..], BOUNDARY_DASHES)?;
    if &input[label_start..label_start + label_len] != CERTIFICATE_LABEL {
        return None;
    }
    let body_start = label_start + label_len + BOUNDARY_DASHES.len();
    let body_len = find(&input[body_start..], END_CERTIFICATE_BOUNDARY)?;
    let body: Vec<u8> = input[body_start..body_start + body_len]
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let der = BASE64_STANDARD.decode(body).ok()?;
    let end = body_start + body_len + END_CERTIFICATE_BOUNDARY.len();
    Some((der, &input[end..]))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
