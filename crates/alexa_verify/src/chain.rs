// Copyright (c) 2025 Cloudflare, Inc.
// Licensed under the BSD-3-Clause license found in the LICENSE file or at https://opensource.org/licenses/BSD-3-Clause

//! Optional check that the signing certificate chains to a trusted root.
//!
//! The platform only requires the name and validity checks on the leaf. A
//! deployment that also pins the issuing CAs builds a [`CertPool`] of roots and
//! hands it to the authenticator.

use crate::{cert::next_pem_certificate, ChainError};
use der::{Decode, Encode};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use x509_cert::{
    ext::pkix::{AuthorityKeyIdentifier, BasicConstraints, SubjectKeyIdentifier},
    Certificate,
};
use x509_verify::VerifyingKey;

/// A set of trusted root certificates. Pinned root sets are small, so issuer
/// lookups scan the whole set.
#[derive(Default, Debug)]
pub struct CertPool {
    fingerprints: HashSet<[u8; 32]>,
    roots: Vec<Certificate>,
}

impl CertPool {
    /// Builds a pool from `certs`, skipping duplicates.
    ///
    /// # Errors
    ///
    /// Returns an error if a certificate cannot be DER-encoded.
    pub fn new(certs: Vec<Certificate>) -> Result<Self, der::Error> {
        let mut pool = Self::default();
        for cert in certs {
            pool.add_cert(cert)?;
        }
        Ok(pool)
    }

    /// Builds a pool from PEM data, e.g. the contents of a roots file.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a sequence of PEM certificates.
    pub fn from_pem(input: &[u8]) -> Result<Self, der::Error> {
        // load_pem_chain rejects empty input.
        if input.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Self::new(Certificate::load_pem_chain(input)?)
    }

    /// Adds `cert` unless a byte-identical certificate is already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be DER-encoded.
    pub fn add_cert(&mut self, cert: Certificate) -> Result<(), der::Error> {
        if self.fingerprints.insert(fingerprint(&cert)?) {
            self.roots.push(cert);
        }
        Ok(())
    }

    /// Returns whether the pool holds exactly `cert`.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be DER-encoded.
    pub fn includes(&self, cert: &Certificate) -> Result<bool, der::Error> {
        Ok(self.fingerprints.contains(&fingerprint(cert)?))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Roots that could have issued `cert`: those whose subject key id matches
    /// its authority key id, or failing that, whose subject matches its issuer.
    fn candidate_issuers<'a>(
        &'a self,
        cert: &Certificate,
    ) -> Result<Vec<&'a Certificate>, der::Error> {
        if let Some((_, aki)) = cert.tbs_certificate.get::<AuthorityKeyIdentifier>()? {
            if let Some(key_id) = aki.key_identifier {
                let mut by_key = Vec::new();
                for root in &self.roots {
                    if let Some((_, ski)) = root.tbs_certificate.get::<SubjectKeyIdentifier>()? {
                        if ski.0 == key_id {
                            by_key.push(root);
                        }
                    }
                }
                if !by_key.is_empty() {
                    return Ok(by_key);
                }
            }
        }
        Ok(self
            .roots
            .iter()
            .filter(|root| root.tbs_certificate.subject == cert.tbs_certificate.issuer)
            .collect())
    }
}

fn fingerprint(cert: &Certificate) -> Result<[u8; 32], der::Error> {
    Ok(Sha256::digest(cert.to_der()?).into())
}

/// Checks that `leaf` chains to a root in `roots`, using the PEM certificates
/// in `intermediates_pem` (everything that followed the leaf in the fetched
/// file) as intermediates.
///
/// The walk stops at the first certificate that is a trusted root or is signed
/// by one, so a chain that ends with a copy of the root is accepted. Each
/// intermediate that gets used must be well-formed, sign the certificate
/// before it, and be a CA within its path length constraint.
///
/// # Errors
///
/// Returns a [`ChainError`] if no path to a trusted root is found.
pub fn verify_chain(
    leaf: &Certificate,
    intermediates_pem: &[u8],
    roots: &CertPool,
) -> Result<(), ChainError> {
    check_well_formedness(leaf)?;

    let intermediates = parse_intermediates(intermediates_pem)?;

    let mut current = leaf;
    for (i, intermediate) in intermediates.iter().enumerate() {
        if has_path_to_root(current, roots, i)? {
            return Ok(());
        }
        check_well_formedness(intermediate)?;
        check_ca_basic_constraints(intermediate, i)?;
        if !signed_by(current, intermediate) {
            return Err(ChainError::InvalidLinkInChain);
        }
        current = intermediate;
    }

    if has_path_to_root(current, roots, intermediates.len())? {
        Ok(())
    } else {
        Err(ChainError::NoPathToTrustedRoot {
            to_verify_issuer: current.tbs_certificate.issuer.to_string(),
        })
    }
}

fn parse_intermediates(mut input: &[u8]) -> Result<Vec<Certificate>, ChainError> {
    let mut certs = Vec::new();
    while !input.iter().all(u8::is_ascii_whitespace) {
        let (der, rest) =
            next_pem_certificate(input).ok_or(ChainError::MalformedIntermediate)?;
        certs.push(Certificate::from_der(&der)?);
        input = rest;
    }
    Ok(certs)
}

/// Returns whether `cert` is a trusted root or is signed by one.
/// `num_intermediates` counts the intermediates below `cert`, for the root's
/// path length constraint.
fn has_path_to_root(
    cert: &Certificate,
    roots: &CertPool,
    num_intermediates: usize,
) -> Result<bool, ChainError> {
    if roots.includes(cert)? {
        return Ok(true);
    }
    Ok(roots.candidate_issuers(cert)?.into_iter().any(|root| {
        signed_by(cert, root) && check_ca_basic_constraints(root, num_intermediates).is_ok()
    }))
}

/// Rejects certificates whose outer signature algorithm differs from the one
/// in the `TBSCertificate`.
fn check_well_formedness(cert: &Certificate) -> Result<(), ChainError> {
    if cert.signature_algorithm != cert.tbs_certificate.signature {
        return Err(ChainError::MismatchingSigAlg);
    }
    Ok(())
}

/// Whether `issuer`'s key verifies the signature on `child`.
fn signed_by(child: &Certificate, issuer: &Certificate) -> bool {
    VerifyingKey::try_from(issuer).is_ok_and(|key| key.verify_strict(child).is_ok())
}

/// Requires `ca_cert` to be a CA whose path length constraint allows
/// `num_intermediates` certificates between it and the leaf.
fn check_ca_basic_constraints(
    ca_cert: &Certificate,
    num_intermediates: usize,
) -> Result<(), ChainError> {
    let allowed = ca_cert
        .tbs_certificate
        .get::<BasicConstraints>()?
        .is_some_and(|(_, bc)| {
            bc.ca
                && bc
                    .path_len_constraint
                    .is_none_or(|max| num_intermediates <= usize::from(max))
        });
    if allowed {
        Ok(())
    } else {
        Err(ChainError::InvalidBasicConstraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::SigningCertificate;

    fn roots() -> CertPool {
        CertPool::from_pem(TEST_ROOT_CA).unwrap()
    }

    #[test]
    fn pool_deduplicates() {
        let mut pool = roots();
        assert_eq!(pool.len(), 1);
        let root = Certificate::load_pem_chain(TEST_ROOT_CA).unwrap().remove(0);
        assert_eq!(pool.candidate_issuers(&root).unwrap().len(), 1);
        assert!(pool.includes(&root).unwrap());
        pool.add_cert(root).unwrap();
        assert_eq!(pool.len(), 1);

        assert!(CertPool::from_pem(b"").unwrap().is_empty());
    }

    #[test]
    fn leaf_with_root_in_chain() {
        let (leaf, rest) = SigningCertificate::from_pem_chain(ECHO_API_CHAIN).unwrap();
        verify_chain(leaf.certificate(), rest, &roots()).unwrap();
    }

    #[test]
    fn leaf_alone() {
        let (leaf, rest) = SigningCertificate::from_pem_chain(OTHER_NAME_CERT).unwrap();
        assert!(rest.iter().all(u8::is_ascii_whitespace));
        verify_chain(leaf.certificate(), rest, &roots()).unwrap();
    }

    #[test]
    fn untrusted_self_signed() {
        let (leaf, rest) = SigningCertificate::from_pem_chain(SELF_SIGNED_CERT).unwrap();
        assert!(matches!(
            verify_chain(leaf.certificate(), rest, &roots()),
            Err(ChainError::NoPathToTrustedRoot { .. })
        ));
    }

    #[test]
    fn empty_root_pool() {
        let (leaf, rest) = SigningCertificate::from_pem_chain(ECHO_API_CHAIN).unwrap();
        assert!(matches!(
            verify_chain(leaf.certificate(), rest, &CertPool::default()),
            Err(ChainError::NoPathToTrustedRoot { .. })
        ));
    }

    #[test]
    fn through_intermediate() {
        let (leaf, rest) = SigningCertificate::from_pem_chain(INTERMEDIATE_CHAIN).unwrap();
        assert!(matches!(
            has_path_to_root(leaf.certificate(), &roots(), 0),
            Ok(false)
        ));
        verify_chain(leaf.certificate(), rest, &roots()).unwrap();

        // The intermediate alone is not enough.
        assert!(matches!(
            verify_chain(leaf.certificate(), b"", &roots()),
            Err(ChainError::NoPathToTrustedRoot { .. })
        ));
    }

    #[test]
    fn intermediate_that_did_not_sign_the_leaf() {
        let (leaf, rest) = SigningCertificate::from_pem_chain(WRONG_INTERMEDIATE_CHAIN).unwrap();
        assert!(matches!(
            verify_chain(leaf.certificate(), rest, &roots()),
            Err(ChainError::InvalidLinkInChain)
        ));
    }

    #[test]
    fn intermediate_that_is_not_a_ca() {
        let (leaf, rest) = SigningCertificate::from_pem_chain(NON_CA_INTERMEDIATE_CHAIN).unwrap();
        assert!(matches!(
            verify_chain(leaf.certificate(), rest, &roots()),
            Err(ChainError::InvalidBasicConstraints)
        ));
    }

    #[test]
    fn path_length_exceeded() {
        // leaf <- sub-intermediate <- intermediate (pathlen 0) <- root
        let (leaf, rest) = SigningCertificate::from_pem_chain(PATH_LENGTH_CHAIN).unwrap();
        assert!(matches!(
            verify_chain(leaf.certificate(), rest, &roots()),
            Err(ChainError::InvalidBasicConstraints)
        ));
    }

    #[test]
    fn malformed_intermediate() {
        let (leaf, _) = SigningCertificate::from_pem_chain(INTERMEDIATE_CHAIN).unwrap();
        assert!(matches!(
            verify_chain(leaf.certificate(), b"trailing junk", &roots()),
            Err(ChainError::MalformedIntermediate)
        ));
        assert!(matches!(
            verify_chain(
                leaf.certificate(),
                b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n",
                &roots()
            ),
            Err(ChainError::Der(_))
        ));
    }
}
