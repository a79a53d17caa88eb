// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

use pfxseal::{cmd::PfxSeal, exit_status_from_error};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let format = fmt::layer().pretty().with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();

    if let Err(error) = run() {
        tracing::error!("{error:?}");
        std::process::exit(exit_status_from_error(error));
    }

    std::process::exit(exitcode::OK);
}

fn run() -> Result<()> {
    PfxSeal::parse().run()
}
