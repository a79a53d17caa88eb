// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

//! Profile and environment resolution.
//!
//! Settings needed to open a credential come from three places, each layer
//! overriding the one before it:
//!
//! 1. the optional TOML profile at `$XDG_CONFIG_HOME/pfxseal/profile.toml`,
//! 2. the `PFX_PATH`, `PFX_PASSWORD`, and `PFX_HOST` environment variables,
//! 3. command line flags.
//!
//! A missing password falls back to an interactive prompt. A missing PFX path
//! is an error, checked before the prompt so scripted runs fail fast.

use crate::{Error, Result};

use config::{Config, File};
use inquire::Password;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Get absolute path to pfxseal's configuration directory.
///
/// # Errors
///
/// - Return [`Error::NoWayConfig`] if path to configuration directory cannot
///   be determined.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|path| path.join("pfxseal")).ok_or(Error::NoWayConfig)
}

/// Deserialized profile file.
///
/// Every field is optional; the profile is only the bottom layer of the
/// resolution stack.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Path to the PFX bundle, shell expansion applied later.
    pub pfx: Option<String>,

    /// Password opening the PFX bundle.
    pub password: Option<String>,

    /// Verification host announced to counterparty tooling.
    pub host: Option<String>,
}

impl Profile {
    /// Load profile from the configuration directory.
    ///
    /// A missing profile file is not an error, the profile is optional.
    ///
    /// # Errors
    ///
    /// - Return [`Error::NoWayConfig`] if the configuration directory cannot
    ///   be determined.
    /// - Return [`Error::Profile`] if the file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join("profile.toml");
        debug!("Load profile at {path:?}");

        let profile = Config::builder()
            .add_source(File::from(path).required(false))
            .build()?
            .try_deserialize()?;

        Ok(profile)
    }
}

/// Fully resolved settings for opening a credential.
pub struct Settings {
    /// Expanded path to the PFX bundle.
    pub pfx: PathBuf,

    /// Password opening the PFX bundle.
    pub password: String,

    /// Verification host, defaults to `127.0.0.1`.
    pub host: String,
}

impl Settings {
    /// Resolve settings from profile, environment, and CLI overrides.
    ///
    /// # Errors
    ///
    /// - Return [`Error::PfxPathMissing`] if no layer provides a PFX path.
    /// - Return [`Error::ExpandPath`] if the path fails shell expansion.
    /// - Return [`Error::Prompt`] if the interactive password prompt fails.
    pub fn resolve(
        profile: Profile,
        pfx: Option<String>,
        password: Option<String>,
        host: Option<String>,
    ) -> Result<Self> {
        trace!("Resolve settings from profile, environment, and CLI");

        let pfx = pfx
            .or_else(|| env_var("PFX_PATH"))
            .or(profile.pfx)
            .ok_or(Error::PfxPathMissing)?;
        let pfx = shellexpand::full(&pfx)
            .map_err(|source| Error::ExpandPath { path: pfx.clone(), source })?
            .into_owned();

        let password = match password.or_else(|| env_var("PFX_PASSWORD")).or(profile.password) {
            Some(password) => password,
            None => Password::new("PFX password:").without_confirmation().prompt()?,
        };

        let host = host
            .or_else(|| env_var("PFX_HOST"))
            .or(profile.host)
            .unwrap_or_else(|| String::from("127.0.0.1"));

        Ok(Self { pfx: pfx.into(), password, host })
    }
}

impl std::fmt::Debug for Settings {
    // INVARIANT: Never leak the password through debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("pfx", &self.pfx)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
