use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use hotcord_core::ModuleLayout;

use crate::codec::AsarCodec;
use crate::splice::splice_reload_hook;

pub const CORE_ASAR: &str = "core.asar";
pub const CORE_ASAR_BACKUP: &str = "original_core.asar";
pub const SHIM_SCRIPT: &str = "index.js";
pub const SHIM_SCRIPT_BACKUP: &str = "original_index.js";

const EXTRACT_DIR: &str = "core";

/// On-disk patch state, encoded by which backup files exist. A partial
/// state means a previous run was interrupted; it is reported, never
/// silently repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    Clean,
    Patched,
    PartialArchiveBackup,
    PartialShimBackup,
}

impl PatchState {
    pub fn probe(module_dir: &Path) -> Self {
        let archive_backup = module_dir.join(CORE_ASAR_BACKUP).exists();
        let shim_backup = module_dir.join(SHIM_SCRIPT_BACKUP).exists();
        match (archive_backup, shim_backup) {
            (false, false) => Self::Clean,
            (true, true) => Self::Patched,
            (true, false) => Self::PartialArchiveBackup,
            (false, true) => Self::PartialShimBackup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    /// The blur anchor was not found in the bootstrap script. The caller
    /// must revert and relaunch; the installation stays unpatched.
    AnchorMissing,
    /// The user declined a destructive overwrite; no new state was created.
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtractOutcome {
    Extracted,
    ArchiveAbsent,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertOutcome {
    Reverted,
    NothingToRevert,
}

/// Runs the patch pipeline: extract the resources archive, splice the
/// reload hook into the bootstrap script, repack, and rewrite the entry
/// shim to strip content-security-policy headers. `consent` is asked
/// before any destructive overwrite.
pub fn apply(
    codec: &dyn AsarCodec,
    layout: &ModuleLayout,
    hook: &str,
    consent: &mut dyn FnMut(&str) -> Result<bool>,
) -> Result<PatchOutcome> {
    let root = layout.modules_dir();

    match PatchState::probe(root) {
        PatchState::Clean => {}
        PatchState::Patched => {
            if !consent("the installation is already patched, overwrite?")? {
                return Ok(PatchOutcome::Declined);
            }
            // Restore the originals first so backups never nest.
            revert(root)?;
        }
        PatchState::PartialArchiveBackup => bail!(
            "found {CORE_ASAR_BACKUP} without {SHIM_SCRIPT_BACKUP} under {}; \
             a previous run was interrupted, restore or remove the backups before patching",
            root.display()
        ),
        PatchState::PartialShimBackup => bail!(
            "found {SHIM_SCRIPT_BACKUP} without {CORE_ASAR_BACKUP} under {}; \
             a previous run was interrupted, restore or remove the backups before patching",
            root.display()
        ),
    }

    if extract(codec, root, consent)? == ExtractOutcome::Declined {
        return Ok(PatchOutcome::Declined);
    }

    let script = layout.script_file();
    let source = fs::read(&script)
        .with_context(|| format!("failed to read bootstrap script: {}", script.display()))?;
    let Some(patched) = splice_reload_hook(&source, hook.as_bytes()) else {
        return Ok(PatchOutcome::AnchorMissing);
    };
    fs::write(&script, patched)
        .with_context(|| format!("failed to write bootstrap script: {}", script.display()))?;

    let work_dir = root.join(EXTRACT_DIR);
    if work_dir.exists() {
        // The backup stays in place on failure so a revert remains possible.
        if let Err(err) = repack(codec, &work_dir, &root.join(CORE_ASAR)) {
            eprintln!("error: failed to repack resources archive: {err:#}");
        }
    }

    rewrite_shim(root)?;
    Ok(PatchOutcome::Patched)
}

fn extract(
    codec: &dyn AsarCodec,
    root: &Path,
    consent: &mut dyn FnMut(&str) -> Result<bool>,
) -> Result<ExtractOutcome> {
    let archive = root.join(CORE_ASAR);
    if !archive.exists() {
        eprintln!(
            "warning: {} not found, continuing without extraction",
            archive.display()
        );
        return Ok(ExtractOutcome::ArchiveAbsent);
    }

    let work_dir = root.join(EXTRACT_DIR);
    if work_dir.exists() {
        if !consent("asar already extracted, overwrite?")? {
            return Ok(ExtractOutcome::Declined);
        }
        fs::remove_dir_all(&work_dir)
            .with_context(|| format!("failed to remove {}", work_dir.display()))?;
    }

    codec.extract(&archive, &work_dir)?;

    // The backup's presence is the signal that extraction happened.
    let backup = root.join(CORE_ASAR_BACKUP);
    fs::rename(&archive, &backup)
        .with_context(|| format!("failed to back up archive: {}", archive.display()))?;
    Ok(ExtractOutcome::Extracted)
}

fn repack(codec: &dyn AsarCodec, work_dir: &Path, archive: &Path) -> Result<()> {
    codec.pack(work_dir, archive)?;
    fs::remove_dir_all(work_dir)
        .with_context(|| format!("failed to remove {}", work_dir.display()))?;
    Ok(())
}

fn rewrite_shim(root: &Path) -> Result<()> {
    let shim = root.join(SHIM_SCRIPT);
    let backup = root.join(SHIM_SCRIPT_BACKUP);
    fs::rename(&shim, &backup)
        .with_context(|| format!("failed to back up entry script: {}", shim.display()))?;
    fs::write(&shim, CSP_SHIM)
        .with_context(|| format!("failed to write entry script: {}", shim.display()))
}

/// Restores any backed-up originals. Missing backups are not an error; the
/// caller relaunches the installation either way.
pub fn revert(module_dir: &Path) -> Result<RevertOutcome> {
    let mut restored = false;
    for (backup_name, original_name) in [
        (CORE_ASAR_BACKUP, CORE_ASAR),
        (SHIM_SCRIPT_BACKUP, SHIM_SCRIPT),
    ] {
        let backup = module_dir.join(backup_name);
        if !backup.exists() {
            continue;
        }
        let original = module_dir.join(original_name);
        fs::rename(&backup, &original)
            .with_context(|| format!("failed to restore {}", original.display()))?;
        restored = true;
    }

    Ok(if restored {
        RevertOutcome::Reverted
    } else {
        RevertOutcome::NothingToRevert
    })
}

/// Entry script installed over `index.js`: drops any response header whose
/// name matches the content-security-policy pattern, then re-exports the
/// original archive module.
const CSP_SHIM: &str = r#"require("electron").session.defaultSession.webRequest.onHeadersReceived(function(details, callback) {
    const responseHeaders = {};
    for (let header in details.responseHeaders) {
        if (!header.match(/^content-security/i)) {
            responseHeaders[header] = details.responseHeaders[header];
        }
    }
    callback({
        cancel: false,
        responseHeaders
    });
});

module.exports = require('./core.asar');
"#;
