// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

//! Fixture-driven tests.
//!
//! The PKCS#12 bundles under `fixture/` were produced with the openssl CLI
//! from throwaway self-signed keys, all protected by [`PASSWORD`]:
//!
//! - `identity.p12`: CN `A123456789-0001`, key and certificate.
//! - `nodash.p12`: CN `B221997924` (no separator), key and certificate.
//! - `nocn.p12`: subject with only C/O/OU, no common name entry.
//! - `certonly.p12`: exported with `-nokeys`, certificate only.
//! - `keyonly.p12`: exported with `-nocerts`, private key only.


use std::path::PathBuf;

pub(crate) const PASSWORD: &str = "changeit";

pub(crate) fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/tests/fixture").join(name)
}
