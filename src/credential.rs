// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

//! PKCS#12 credential handling.
//!
//! Contains the [`Credential`] type, an opened PFX bundle that exposes the
//! holder identity and certificate metadata. Signing routines that operate on
//! a credential live in the [`seal`](crate::seal) module.

use crate::{Error, Result};

use openssl::{
    asn1::Asn1Time,
    nid::Nid,
    pkcs12::Pkcs12,
    pkey::{PKey, PKeyRef, Private},
    stack::{Stack, StackRef},
    x509::{X509Ref, X509},
};
use std::path::Path;
use tracing::{debug, instrument, trace};

/// Opened PKCS#12 identity bundle.
///
/// Holds the end-entity certificate, its private key, and whatever CA chain
/// the bundle shipped with. The password used to open the bundle is dropped
/// immediately after parsing.
///
/// # Invariants
///
/// - Certificate and private key are always both present.
/// - The CA chain may be empty, never absent.
pub struct Credential {
    cert: X509,
    pkey: PKey<Private>,
    chain: Stack<X509>,
}

impl Credential {
    /// Load credential from a PFX file on disk.
    ///
    /// # Errors
    ///
    /// - Return [`Error::PfxRead`] if the file cannot be read.
    /// - Propagate everything [`Credential::from_der`] can fail with.
    #[instrument(skip(password), level = "debug")]
    pub fn load(path: impl AsRef<Path> + std::fmt::Debug, password: &str) -> Result<Self> {
        trace!("Read PFX bundle from disk");
        let der = std::fs::read(path.as_ref())
            .map_err(|source| Error::PfxRead { path: path.as_ref().into(), source })?;

        Self::from_der(&der, password)
    }

    /// Parse credential from in-memory PFX data.
    ///
    /// # Errors
    ///
    /// - Return [`Error::PfxParse`] if the data is not a PKCS#12 structure,
    ///   or the password does not open it.
    /// - Return [`Error::CertMissing`] or [`Error::KeyMissing`] if the bundle
    ///   parses but lacks either half of the identity.
    pub fn from_der(der: &[u8], password: &str) -> Result<Self> {
        let pkcs12 = Pkcs12::from_der(der).map_err(|source| Error::PfxParse { source })?;
        let parsed = pkcs12.parse2(password).map_err(|source| Error::PfxParse { source })?;

        // INVARIANT: Check the key first. A cert-only bundle leaves
        // `parsed.cert` unset too, because parse2 only pairs a certificate
        // with a matching key, so the cert check alone would misreport it.
        let pkey = parsed.pkey.ok_or(Error::KeyMissing)?;
        let cert = parsed.cert.ok_or(Error::CertMissing)?;
        let chain = match parsed.ca {
            Some(chain) => chain,
            None => Stack::new()?,
        };
        debug!("Credential opened with {} chained CA certificate(s)", chain.len());

        Ok(Self { cert, pkey, chain })
    }

    /// Person id of the credential holder.
    ///
    /// Registration authorities place the holder's national id in front of
    /// the subject common name, separated from branch or sequence markers by
    /// `-`. A common name without a `-` is returned whole.
    ///
    /// # Errors
    ///
    /// - Return [`Error::CommonNameMissing`] if the subject has no CN entry.
    pub fn person_id(&self) -> Result<String> {
        let cn = self.common_name()?;
        match cn.split_once('-') {
            Some((id, _)) => Ok(id.to_string()),
            None => Ok(cn),
        }
    }

    /// Full subject common name of the certificate.
    ///
    /// # Errors
    ///
    /// - Return [`Error::CommonNameMissing`] if the subject has no CN entry.
    pub fn common_name(&self) -> Result<String> {
        let entry = self
            .cert
            .subject_name()
            .entries_by_nid(Nid::COMMONNAME)
            .next()
            .ok_or(Error::CommonNameMissing)?;

        Ok(entry.data().as_utf8()?.to_string())
    }

    /// Certificate serial number as uppercase hex.
    pub fn serial_number(&self) -> Result<String> {
        let serial = self.cert.serial_number().to_bn()?;
        Ok(serial.to_hex_str()?.to_string())
    }

    /// Start of the certificate validity window, as OpenSSL renders it.
    pub fn not_before(&self) -> String {
        self.cert.not_before().to_string()
    }

    /// End of the certificate validity window, as OpenSSL renders it.
    pub fn not_after(&self) -> String {
        self.cert.not_after().to_string()
    }

    /// Determine whether the certificate validity window has closed.
    ///
    /// # Errors
    ///
    /// - Will fail if the ASN.1 times cannot be compared.
    pub fn is_expired(&self) -> Result<bool> {
        let now = Asn1Time::days_from_now(0)?;
        let remaining = now.diff(self.cert.not_after())?;

        Ok(remaining.days < 0 || (remaining.days == 0 && remaining.secs < 0))
    }

    pub(crate) fn cert(&self) -> &X509Ref {
        &self.cert
    }

    pub(crate) fn pkey(&self) -> &PKeyRef<Private> {
        &self.pkey
    }

    pub(crate) fn chain(&self) -> &StackRef<X509> {
        &self.chain
    }
}

impl std::fmt::Debug for Credential {
    // INVARIANT: Never leak key material through debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("cert", &self.cert)
            .field("chain_len", &self.chain.len())
            .finish_non_exhaustive()
    }
}
