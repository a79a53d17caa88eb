// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

//! Command set implementation.
//!
//! This module is the forward facing API of the internal library. It is meant
//! to be used in `main` of the pfxseal binary. The entire pfxseal command set
//! is implemented right here!

use crate::{
    config::{Profile, Settings},
    credential::Credential,
    seal::Seal,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{
    fs::{read, read_to_string, write},
    path::PathBuf,
};
use tracing::{info, instrument};

/// pfxseal public command set CLI.
#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "\n  pfxseal [options] <command>",
    subcommand_help_heading = "Commands",
    version,
)]
pub struct PfxSeal {
    /// Path to the PFX bundle (overrides PFX_PATH and the profile).
    #[arg(long, short, value_name = "path")]
    pub pfx: Option<String>,

    /// Password opening the PFX bundle (overrides PFX_PASSWORD and the
    /// profile; prompted when absent everywhere).
    #[arg(long, value_name = "password")]
    pub password: Option<String>,

    /// Verification host (overrides PFX_HOST and the profile).
    #[arg(long, value_name = "addr")]
    pub host: Option<String>,

    /// Command-set interfaces.
    #[command(subcommand)]
    pub command: Command,
}

impl PfxSeal {
    /// Run pfxseal command based on given arguments.
    ///
    /// # Errors
    ///
    /// Will fail if settings cannot be resolved, the credential cannot be
    /// opened, or the given command implementation fails.
    pub fn run(self) -> Result<()> {
        let profile = Profile::load()?;
        let settings = Settings::resolve(profile, self.pfx, self.password, self.host)?;

        match self.command {
            Command::Info(opts) => run_info(&settings, opts),
            Command::Sign(opts) => run_sign(&settings, opts),
            Command::Verify(opts) => run_verify(&settings, opts),
        }
    }
}

/// Full command-set of pfxseal.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show identity and validity details of the credential.
    #[command(override_usage = "pfxseal [options] info [options]")]
    Info(InfoOptions),

    /// Sign a file into a seal.
    #[command(override_usage = "pfxseal [options] sign [options] <file>")]
    Sign(SignOptions),

    /// Verify a seal and recover its content.
    #[command(override_usage = "pfxseal [options] verify [options] <seal-file>")]
    Verify(VerifyOptions),
}

/// Show identity and validity details of the credential.
#[derive(Parser, Clone, Debug)]
#[command(about, long_about)]
pub struct InfoOptions {
    /// Print the person id only, for scripting.
    #[arg(short, long)]
    pub id_only: bool,
}

/// Sign a file into a seal.
#[derive(Parser, Clone, Debug)]
#[command(about, long_about)]
pub struct SignOptions {
    /// File whose content gets signed.
    #[arg(value_name = "file")]
    pub input: PathBuf,

    /// Write the base64 seal here instead of stdout.
    #[arg(short, long, value_name = "file")]
    pub output: Option<PathBuf>,
}

/// Verify a seal and recover its content.
#[derive(Parser, Clone, Debug)]
#[command(about, long_about)]
pub struct VerifyOptions {
    /// File holding the base64 seal.
    #[arg(value_name = "seal-file")]
    pub input: PathBuf,

    /// Extract the embedded content here.
    #[arg(short, long, value_name = "file")]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings, opts), level = "debug")]
fn run_info(settings: &Settings, opts: InfoOptions) -> Result<()> {
    let credential = Credential::load(&settings.pfx, &settings.password)?;

    if opts.id_only {
        println!("{}", credential.person_id()?);
        return Ok(());
    }

    let person_id = credential.person_id()?;
    let common_name = credential.common_name()?;
    let serial = credential.serial_number()?;
    let not_before = credential.not_before();
    let not_after = credential.not_after();
    let state = if credential.is_expired()? { "expired" } else { "valid" };

    let mut builder = tabled::builder::Builder::new();
    builder.push_record(["person id", person_id.as_str()]);
    builder.push_record(["common name", common_name.as_str()]);
    builder.push_record(["serial", serial.as_str()]);
    builder.push_record(["not before", not_before.as_str()]);
    builder.push_record(["not after", not_after.as_str()]);
    builder.push_record(["state", state]);
    builder.push_record(["verify host", settings.host.as_str()]);

    let mut table = builder.build();
    table.with(tabled::settings::Style::ascii_rounded());
    println!("{table}");

    Ok(())
}

#[instrument(skip(settings, opts), level = "debug")]
fn run_sign(settings: &Settings, opts: SignOptions) -> Result<()> {
    let credential = Credential::load(&settings.pfx, &settings.password)?;
    let data =
        read(&opts.input).with_context(|| format!("Failed to read {:?}", opts.input))?;

    let seal = credential.sign(&data)?;
    match &opts.output {
        Some(path) => {
            write(path, seal.to_string())
                .with_context(|| format!("Failed to write {path:?}"))?;
            info!("Seal written to {path:?}");
        }
        None => println!("{seal}"),
    }

    Ok(())
}

#[instrument(skip(settings, opts), level = "debug")]
fn run_verify(settings: &Settings, opts: VerifyOptions) -> Result<()> {
    let credential = Credential::load(&settings.pfx, &settings.password)?;
    let text =
        read_to_string(&opts.input).with_context(|| format!("Failed to read {:?}", opts.input))?;

    let seal: Seal = text.parse()?;
    let content = credential.open_seal(&seal)?;
    info!("Seal carries {} byte(s) of content", content.len());

    if let Some(path) = &opts.output {
        write(path, &content).with_context(|| format!("Failed to write {path:?}"))?;
    }

    println!("verified: {}", credential.person_id()?);

    Ok(())
}
