use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use semver::Version;

/// Parses an exact `A.B.C` numeric version. Pre-release or build suffixes
/// are rejected so directory names like `0.0.1-beta` never win selection.
pub fn parse_version_triple(name: &str) -> Option<Version> {
    let version = Version::parse(name).ok()?;
    if !version.pre.is_empty() || !version.build.is_empty() {
        return None;
    }
    Some(version)
}

/// Returns the name of the subdirectory with the greatest numeric version.
/// Entries that are not directories or do not parse as a version triple are
/// skipped; zero valid entries is an error.
pub fn latest_version_dir(dir: &Path) -> Result<String> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read version directory: {}", dir.display()))?;

    let mut best: Option<(Version, String)> = None;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(ToOwned::to_owned) else {
            continue;
        };
        let Some(version) = parse_version_triple(&name) else {
            continue;
        };
        if best.as_ref().map_or(true, |(current, _)| version > *current) {
            best = Some((version, name));
        }
    }

    best.map(|(_, name)| name).ok_or_else(|| {
        anyhow!(
            "could not find an application version under {}",
            dir.display()
        )
    })
}
