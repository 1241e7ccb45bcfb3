use std::path::{Path, PathBuf};

/// One discovered on-disk installation, identified by its install directory
/// and executable base name. Process ids accumulate during the discovery
/// scan and are drained when the installation is terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    install_dir: PathBuf,
    executable: String,
    pids: Vec<u32>,
}

impl Installation {
    pub fn new(install_dir: impl Into<PathBuf>, executable: impl Into<String>) -> Self {
        Self {
            install_dir: install_dir.into(),
            executable: executable.into(),
            pids: Vec::new(),
        }
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn executable_path(&self) -> PathBuf {
        self.install_dir.join(&self.executable)
    }

    pub fn pids(&self) -> &[u32] {
        &self.pids
    }

    pub fn push_pid(&mut self, pid: u32) {
        self.pids.push(pid);
    }

    pub fn take_pids(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.pids)
    }
}

/// Resolved patch target: the version-specific modules directory plus the
/// installation's resources directory. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    modules_dir: PathBuf,
    resources_dir: PathBuf,
}

impl ModuleLayout {
    pub fn new(modules_dir: impl Into<PathBuf>, resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            modules_dir: modules_dir.into(),
            resources_dir: resources_dir.into(),
        }
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// The one script that bootstraps the main window.
    pub fn script_file(&self) -> PathBuf {
        self.modules_dir.join("core").join("app").join("mainScreen.js")
    }

    pub fn default_css(&self) -> PathBuf {
        self.modules_dir.join("discord-custom.css")
    }

    pub fn default_js(&self) -> PathBuf {
        self.modules_dir.join("discord-custom.js")
    }
}
