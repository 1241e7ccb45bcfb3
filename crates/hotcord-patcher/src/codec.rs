use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};

/// Pack/unpack capability for the resources archive. The archive's internal
/// format is opaque to the pipeline; tests substitute an in-memory fake.
pub trait AsarCodec {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;
    fn pack(&self, dir: &Path, archive: &Path) -> Result<()>;
}

/// Production codec that shells out to the `asar` command-line tool,
/// falling back to `npx asar` when it is not on PATH.
pub struct AsarCommand;

impl AsarCodec for AsarCommand {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        if run_command(
            Command::new("asar").arg("extract").arg(archive).arg(dest),
            "failed to extract asar archive",
        )
        .is_ok()
        {
            return Ok(());
        }

        run_command(
            Command::new("npx")
                .arg("--yes")
                .arg("asar")
                .arg("extract")
                .arg(archive)
                .arg(dest),
            "failed to extract asar archive with npx fallback",
        )
    }

    fn pack(&self, dir: &Path, archive: &Path) -> Result<()> {
        if run_command(
            Command::new("asar").arg("pack").arg(dir).arg(archive),
            "failed to pack asar archive",
        )
        .is_ok()
        {
            return Ok(());
        }

        run_command(
            Command::new("npx")
                .arg("--yes")
                .arg("asar")
                .arg("pack")
                .arg(dir)
                .arg(archive),
            "failed to pack asar archive with npx fallback",
        )
    }
}

fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}
