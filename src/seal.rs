// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

//! PKCS#7 signature envelopes.
//!
//! Provides the [`Seal`] type plus the signing and verification routines on
//! [`Credential`]. Seals travel as base64 of the PKCS#7 DER encoding, with
//! the signed content embedded. Counterparty services reject PEM armor and
//! line breaks, so the textual form is a single base64 run.

use crate::{credential::Credential, Error, Result};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use openssl::{
    pkcs7::{Pkcs7, Pkcs7Flags},
    stack::Stack,
    x509::store::X509StoreBuilder,
};
use tracing::{debug, instrument};

/// PKCS#7 signed-data envelope in DER form.
#[derive(Clone, PartialEq, Eq)]
pub struct Seal(Vec<u8>);

impl Seal {
    /// Wrap raw PKCS#7 DER bytes.
    pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
        Self(der.into())
    }

    /// Raw DER bytes of the envelope.
    pub fn as_der(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Seal {
    /// Render the wire form: base64 of the DER, no armor, no line breaks.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", STANDARD.encode(&self.0))
    }
}

impl std::str::FromStr for Seal {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self(STANDARD.decode(text.trim())?))
    }
}

impl std::fmt::Debug for Seal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seal({} bytes)", self.0.len())
    }
}

impl Credential {
    /// Sign data into a seal.
    ///
    /// Signs in binary mode with the content embedded, carrying the bundled
    /// CA chain as extra certificates so counterparties can rebuild the path.
    ///
    /// # Errors
    ///
    /// - Will fail if the PKCS#7 structure cannot be produced or serialized.
    #[instrument(skip(self, data), level = "debug")]
    pub fn sign(&self, data: &[u8]) -> Result<Seal> {
        debug!("Sign {} byte(s) of content", data.len());
        let pkcs7 = Pkcs7::sign(self.cert(), self.pkey(), self.chain(), data, Pkcs7Flags::BINARY)?;

        Ok(Seal(pkcs7.to_der()?))
    }

    /// Verify a seal against this credential and return the embedded content.
    ///
    /// The credential's certificate acts as the trust anchor, so only seals
    /// produced by this identity (or one chaining up to it) open.
    ///
    /// # Errors
    ///
    /// - Return [`Error::SealRejected`] if the envelope does not parse, the
    ///   signature does not hold, or the signer is not trusted.
    #[instrument(skip(self, seal), level = "debug")]
    pub fn open_seal(&self, seal: &Seal) -> Result<Vec<u8>> {
        let pkcs7 =
            Pkcs7::from_der(seal.as_der()).map_err(|source| Error::SealRejected { source })?;

        let mut store = X509StoreBuilder::new()?;
        store.add_cert(self.cert().to_owned())?;
        let store = store.build();

        let certs = Stack::new()?;
        let mut content = Vec::new();
        pkcs7
            .verify(&certs, &store, None, Some(&mut content), Pkcs7Flags::BINARY)
            .map_err(|source| Error::SealRejected { source })?;
        debug!("Seal opened, {} byte(s) of content recovered", content.len());

        Ok(content)
    }
}
