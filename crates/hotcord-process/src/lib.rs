use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{anyhow, bail, Context, Result};
use sysinfo::{Pid, System};

use hotcord_core::{Installation, HELPER_SUFFIX, PRODUCT_PREFIX};

/// One enumerated OS process with a readable executable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub exe: PathBuf,
}

/// Enumerates running processes. Processes whose executable path cannot be
/// read (permissions, races) are skipped rather than failing the scan.
pub fn scan() -> Vec<ProcessRecord> {
    let mut system = System::new_all();
    system.refresh_all();

    let mut records = Vec::new();
    for (pid, process) in system.processes() {
        let Some(exe) = process.exe() else {
            continue;
        };
        records.push(ProcessRecord {
            pid: pid.as_u32(),
            exe: exe.to_path_buf(),
        });
    }
    records
}

/// Groups process records into installations keyed by executable base name.
/// Only executables starting with the product prefix and not ending with
/// the helper suffix are accepted. Records sharing the same install
/// directory and executable collapse into one installation.
pub fn group_installations(
    records: impl IntoIterator<Item = ProcessRecord>,
) -> BTreeMap<String, Installation> {
    let mut installs: BTreeMap<String, Installation> = BTreeMap::new();
    for record in records {
        let Some(name) = record.exe.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !name.starts_with(PRODUCT_PREFIX) || name.ends_with(HELPER_SUFFIX) {
            continue;
        }
        let Some(install_dir) = record.exe.parent() else {
            continue;
        };

        let entry = installs
            .entry(name.to_string())
            .or_insert_with(|| Installation::new(install_dir, name));
        if entry.install_dir() == install_dir {
            entry.push_pid(record.pid);
        }
    }
    installs
}

/// Full discovery pass. Fails when no installation is running.
pub fn discover() -> Result<BTreeMap<String, Installation>> {
    let installs = group_installations(scan());
    if installs.is_empty() {
        bail!("could not find a running Discord executable");
    }
    Ok(installs)
}

/// Validates a user-entered installation index against an ordered list of
/// `len` candidates. Pure so the interactive re-prompt loop stays testable.
pub fn parse_selection(input: &str, len: usize) -> Result<usize> {
    let index: usize = input
        .trim()
        .parse()
        .map_err(|_| anyhow!("selection must be a number"))?;
    if index >= len {
        bail!("selection {index} is out of range (expected 0..{len})");
    }
    Ok(index)
}

/// Force-kills every tracked process of the installation, draining its pid
/// set. Files are only touched after this returns.
pub fn terminate(install: &mut Installation) {
    let mut system = System::new_all();
    system.refresh_all();
    for pid in install.take_pids() {
        if let Some(process) = system.process(Pid::from_u32(pid)) {
            process.kill();
        }
    }
}

/// Relaunches the installation detached, with its output discarded.
pub fn launch(install: &Installation) -> Result<()> {
    let exe = install.executable_path();
    Command::new(&exe)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to relaunch {}", exe.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests;
