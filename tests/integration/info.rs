// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

use crate::{fixture, pfxseal, PASSWORD};

use anyhow::Result;

#[test]
fn info_id_only_prints_person_id() -> Result<()> {
    let mut cmd = pfxseal("info_id_only")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", PASSWORD, "info", "--id-only"]);

    cmd.assert().success().stdout("A123456789\n");

    Ok(())
}

#[test]
fn info_table_lists_identity_and_host() -> Result<()> {
    let mut cmd = pfxseal("info_table")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", PASSWORD, "--host", "10.1.2.3", "info"]);

    let output = cmd.output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("A123456789"));
    assert!(stdout.contains("A123456789-0001"));
    assert!(stdout.contains("valid"));
    assert!(stdout.contains("10.1.2.3"));

    Ok(())
}

#[test]
fn info_resolves_environment_config() -> Result<()> {
    let mut cmd = pfxseal("info_env")?;
    cmd.env("PFX_PATH", fixture("identity.p12"))
        .env("PFX_PASSWORD", PASSWORD)
        .args(["info", "--id-only"]);

    cmd.assert().success().stdout("A123456789\n");

    Ok(())
}

#[test]
fn info_without_pfx_path_fails_with_config_code() -> Result<()> {
    let mut cmd = pfxseal("info_no_path")?;
    cmd.args(["info"]);

    // sysexits EX_CONFIG
    cmd.assert().failure().code(78);

    Ok(())
}

#[test]
fn info_with_wrong_password_fails_with_data_code() -> Result<()> {
    let mut cmd = pfxseal("info_bad_password")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", "not the password", "info"]);

    // sysexits EX_DATAERR
    cmd.assert().failure().code(65);

    Ok(())
}
