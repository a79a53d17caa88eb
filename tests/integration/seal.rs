// SPDX-FileCopyrightText: 2026 pfxseal contributors
// SPDX-License-Identifier: MIT

use crate::{fixture, pfxseal, scratch_dir, PASSWORD};

use anyhow::Result;

#[test]
fn sign_then_verify_roundtrip() -> Result<()> {
    let dir = scratch_dir("seal_roundtrip")?;
    let message = dir.join("message.txt");
    std::fs::write(&message, b"delivery order 1234567890")?;
    let sealed = dir.join("message.seal");
    let extracted = dir.join("extracted.bin");

    let mut cmd = pfxseal("seal_roundtrip")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", PASSWORD, "sign"])
        .arg(&message)
        .arg("--output")
        .arg(&sealed);
    cmd.assert().success();

    let mut cmd = pfxseal("seal_roundtrip")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", PASSWORD, "verify"])
        .arg(&sealed)
        .arg("--output")
        .arg(&extracted);
    cmd.assert().success().stdout("verified: A123456789\n");

    let content = std::fs::read(&extracted)?;
    assert_eq!(content, b"delivery order 1234567890");

    Ok(())
}

#[test]
fn sign_writes_bare_base64_to_stdout() -> Result<()> {
    let dir = scratch_dir("seal_stdout")?;
    let message = dir.join("message.txt");
    std::fs::write(&message, b"1234567890")?;

    let mut cmd = pfxseal("seal_stdout")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", PASSWORD, "sign"])
        .arg(&message);

    let output = cmd.output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let seal = stdout.trim_end();
    assert!(!seal.is_empty());
    assert!(!seal.contains("-----"));
    assert!(seal.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));

    Ok(())
}

#[test]
fn verify_rejects_garbage_with_data_code() -> Result<()> {
    let dir = scratch_dir("seal_garbage")?;
    let bogus = dir.join("bogus.seal");
    std::fs::write(&bogus, "not base64!!")?;

    let mut cmd = pfxseal("seal_garbage")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", PASSWORD, "verify"])
        .arg(&bogus);

    // sysexits EX_DATAERR
    cmd.assert().failure().code(65);

    Ok(())
}

#[test]
fn verify_rejects_foreign_signer() -> Result<()> {
    let dir = scratch_dir("seal_foreign")?;
    let message = dir.join("message.txt");
    std::fs::write(&message, b"1234567890")?;
    let sealed = dir.join("message.seal");

    let mut cmd = pfxseal("seal_foreign")?;
    cmd.arg("--pfx")
        .arg(fixture("identity.p12"))
        .args(["--password", PASSWORD, "sign"])
        .arg(&message)
        .arg("--output")
        .arg(&sealed);
    cmd.assert().success();

    let mut cmd = pfxseal("seal_foreign")?;
    cmd.arg("--pfx")
        .arg(fixture("nodash.p12"))
        .args(["--password", PASSWORD, "verify"])
        .arg(&sealed);
    cmd.assert().failure().code(65);

    Ok(())
}
