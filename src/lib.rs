// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

//! Internal library for the pfxseal tool.
//!
//! pfxseal opens a password-protected PKCS#12 (PFX) bundle holding a personal
//! certificate and its private key, the kind issued by registration
//! authorities for brokerage accounts. From that bundle it derives the holder
//! identity, reports the certificate validity window, and produces PKCS#7
//! signature envelopes ("seals") over arbitrary data.
//!
//! ## The Concept of a Seal
//!
//! A __seal__ is a PKCS#7 signed-data structure with the signed content
//! embedded, produced in binary mode and transported as plain base64 of the
//! DER encoding. Counterparty services that accept these envelopes expect
//! exactly that format: no PEM armor, no line breaks. Opening a seal verifies
//! the signature against the credential's certificate and hands back the
//! embedded content.
//!
//! The __person id__ is the leading segment of the certificate subject common
//! name, up to the first `-`. Registration authorities encode the national id
//! of the holder there and suffix it with branch or sequence markers, so a
//! common name without a `-` is already the person id.

#![warn(
    clippy::complexity,
    clippy::correctness,
    missing_debug_implementations,
    rust_2021_compatibility
)]

pub mod cmd;
pub mod config;
pub mod credential;
pub mod seal;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

/// Failure conditions of the pfxseal library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// PFX file could not be read from disk.
    #[error("Failed to read PFX file {path:?}")]
    PfxRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PFX data could not be parsed, e.g., wrong password or corrupt bundle.
    #[error("Failed to parse PFX data")]
    PfxParse {
        #[source]
        source: openssl::error::ErrorStack,
    },

    /// Parsed bundle carries no end-entity certificate.
    #[error("PFX bundle contains no certificate")]
    CertMissing,

    /// Parsed bundle carries no private key.
    #[error("PFX bundle contains no private key")]
    KeyMissing,

    /// Certificate subject has no common name to derive a person id from.
    #[error("Certificate subject has no common name entry")]
    CommonNameMissing,

    /// Seal envelope was rejected during verification.
    #[error("Seal verification rejected")]
    SealRejected {
        #[source]
        source: openssl::error::ErrorStack,
    },

    /// Seal text is not valid base64.
    #[error("Seal is not valid base64")]
    SealEncoding {
        #[from]
        source: base64::DecodeError,
    },

    /// No PFX path given through CLI, environment, or profile.
    #[error("No PFX path configured, set --pfx, PFX_PATH, or the profile")]
    PfxPathMissing,

    /// Path to configuration directory cannot be determined.
    #[error("Cannot determine path to configuration directory")]
    NoWayConfig,

    /// Profile file exists, but could not be loaded.
    #[error("Failed to load profile")]
    Profile {
        #[from]
        source: ::config::ConfigError,
    },

    /// Configured PFX path failed shell expansion.
    #[error("Cannot expand path {path:?}")]
    ExpandPath {
        path: String,
        #[source]
        source: shellexpand::LookupError<std::env::VarError>,
    },

    /// Interactive password prompt failed.
    #[error("Password prompt failed")]
    Prompt {
        #[from]
        source: inquire::InquireError,
    },

    /// Any other OpenSSL failure.
    #[error("OpenSSL failure")]
    Openssl {
        #[from]
        source: openssl::error::ErrorStack,
    },
}

/// Result alias over [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Map an error chain to a BSD-style exit status.
///
/// Walks the full cause chain so wrapped context does not hide the typed
/// error that decides the status.
pub fn exit_status_from_error(error: anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(error) = cause.downcast_ref::<Error>() {
            return match error {
                Error::PfxRead { .. } => exitcode::NOINPUT,
                Error::PfxParse { .. }
                | Error::CertMissing
                | Error::KeyMissing
                | Error::CommonNameMissing
                | Error::SealRejected { .. }
                | Error::SealEncoding { .. } => exitcode::DATAERR,
                Error::PfxPathMissing
                | Error::NoWayConfig
                | Error::Profile { .. }
                | Error::ExpandPath { .. } => exitcode::CONFIG,
                Error::Prompt { .. } => exitcode::IOERR,
                Error::Openssl { .. } => exitcode::SOFTWARE,
            };
        }

        if cause.downcast_ref::<std::io::Error>().is_some() {
            return exitcode::IOERR;
        }
    }

    exitcode::SOFTWARE
}
