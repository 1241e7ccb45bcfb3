mod install;
mod resolve;
mod version;

pub use install::{Installation, ModuleLayout};
pub use resolve::{
    host_resolver, AppDirResolver, BundleResolver, ConfigDirResolver, ModuleResolver,
};
pub use version::{latest_version_dir, parse_version_triple};

/// Executable base names are accepted when they start with this prefix.
pub const PRODUCT_PREFIX: &str = "Discord";

/// Auxiliary renderer/GPU processes carry this suffix and are never patched.
pub const HELPER_SUFFIX: &str = "Helper";

/// Directory under `modules/` that holds the main-window bootstrap script.
pub const CORE_MODULE_DIR: &str = "discord_desktop_core";
