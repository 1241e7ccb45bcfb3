use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::install::{Installation, ModuleLayout};
use crate::version::latest_version_dir;
use crate::CORE_MODULE_DIR;

/// Computes the version-specific module layout for an installation. One
/// concrete strategy exists per host layout convention; the strategy is
/// selected once at startup by [`host_resolver`]. Each strategy carries its
/// root directories as fields so tests can inject fakes.
pub trait ModuleResolver {
    fn resolve(&self, install: &Installation) -> Result<ModuleLayout>;
}

pub fn host_resolver() -> Result<Box<dyn ModuleResolver>> {
    if cfg!(windows) {
        return Ok(Box::new(AppDirResolver::host()?));
    }
    if cfg!(target_os = "macos") {
        return Ok(Box::new(BundleResolver::host()?));
    }
    Ok(Box::new(ConfigDirResolver::host()?))
}

fn home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set; cannot resolve home directory")?;
    Ok(PathBuf::from(home))
}

/// Windows-style layout: the install directory is
/// `<channel>\app-<version>`, and the modules live under the roaming user
/// data root as `<root>\<channel>\<version>\modules\discord_desktop_core`.
#[derive(Debug, Clone)]
pub struct AppDirResolver {
    user_data_root: PathBuf,
}

impl AppDirResolver {
    pub fn new(user_data_root: impl Into<PathBuf>) -> Self {
        Self {
            user_data_root: user_data_root.into(),
        }
    }

    pub fn host() -> Result<Self> {
        let app_data =
            std::env::var("APPDATA").context("APPDATA is not set; cannot resolve user data root")?;
        Ok(Self::new(app_data))
    }
}

impl ModuleResolver for AppDirResolver {
    fn resolve(&self, install: &Installation) -> Result<ModuleLayout> {
        let dir = install.install_dir();
        let leaf = dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                anyhow!("install directory has no usable name: {}", dir.display())
            })?;
        let version = leaf.strip_prefix("app-").unwrap_or(leaf);

        let channel = dir
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                anyhow!(
                    "install directory has no channel parent: {}",
                    dir.display()
                )
            })?;

        let modules = self
            .user_data_root
            .join(channel)
            .join(version)
            .join("modules")
            .join(CORE_MODULE_DIR);
        Ok(ModuleLayout::new(modules, dir.join("resources")))
    }
}

/// Bundle-style layout: no path segment encodes the version, so it is read
/// from the `Info.plist` sitting one level above the executable directory.
#[derive(Debug, Clone)]
pub struct BundleResolver {
    app_support_root: PathBuf,
}

impl BundleResolver {
    pub fn new(app_support_root: impl Into<PathBuf>) -> Self {
        Self {
            app_support_root: app_support_root.into(),
        }
    }

    pub fn host() -> Result<Self> {
        Ok(Self::new(
            home_dir()?.join("Library").join("Application Support"),
        ))
    }
}

impl ModuleResolver for BundleResolver {
    fn resolve(&self, install: &Installation) -> Result<ModuleLayout> {
        let contents = install.install_dir().parent().ok_or_else(|| {
            anyhow!(
                "install directory has no bundle parent: {}",
                install.install_dir().display()
            )
        })?;

        let manifest_path = contents.join("Info.plist");
        let manifest = plist::Value::from_file(&manifest_path).with_context(|| {
            format!("failed to read bundle manifest: {}", manifest_path.display())
        })?;
        let manifest = manifest.as_dictionary().ok_or_else(|| {
            anyhow!(
                "bundle manifest is not a dictionary: {}",
                manifest_path.display()
            )
        })?;

        let version = manifest
            .get("CFBundleVersion")
            .and_then(|value| value.as_string())
            .ok_or_else(|| {
                anyhow!(
                    "CFBundleVersion missing from bundle manifest: {}",
                    manifest_path.display()
                )
            })?;
        let channel = manifest
            .get("CFBundleName")
            .and_then(|value| value.as_string())
            .ok_or_else(|| {
                anyhow!(
                    "CFBundleName missing from bundle manifest: {}",
                    manifest_path.display()
                )
            })?
            .replace(' ', "")
            .to_lowercase();

        let modules = self
            .app_support_root
            .join(channel)
            .join(version)
            .join("modules")
            .join(CORE_MODULE_DIR);
        Ok(ModuleLayout::new(modules, contents.join("Resources")))
    }
}

/// Config-directory layout: the channel comes from the install directory's
/// base name with separators stripped, and the greatest numeric version
/// directory under `<config_root>/<channel>` wins.
#[derive(Debug, Clone)]
pub struct ConfigDirResolver {
    config_root: PathBuf,
}

impl ConfigDirResolver {
    pub fn new(config_root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: config_root.into(),
        }
    }

    pub fn host() -> Result<Self> {
        if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
            if !config_home.trim().is_empty() {
                return Ok(Self::new(config_home));
            }
        }
        Ok(Self::new(home_dir()?.join(".config")))
    }
}

impl ModuleResolver for ConfigDirResolver {
    fn resolve(&self, install: &Installation) -> Result<ModuleLayout> {
        let dir = install.install_dir();
        let channel = dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                anyhow!("install directory has no usable name: {}", dir.display())
            })?
            .replace('-', "");

        let channel_dir = self.config_root.join(&channel);
        let version = latest_version_dir(&channel_dir)?;

        let modules = channel_dir
            .join(version)
            .join("modules")
            .join(CORE_MODULE_DIR);
        Ok(ModuleLayout::new(modules, dir.join("resources")))
    }
}
