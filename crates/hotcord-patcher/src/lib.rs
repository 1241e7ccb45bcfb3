mod codec;
mod inject;
mod pipeline;
mod splice;

pub use codec::{AsarCodec, AsarCommand};
pub use inject::{
    escape_js_path, injection_script, reload_hook, user_home, write_injection_script,
    InjectionConfig, INJECTION_DIR, INJECTION_FILE,
};
pub use pipeline::{
    apply, revert, PatchOutcome, PatchState, RevertOutcome, CORE_ASAR, CORE_ASAR_BACKUP,
    SHIM_SCRIPT, SHIM_SCRIPT_BACKUP,
};
pub use splice::{
    find_subslice, replace_first, splice_reload_hook, BLUR_ANCHOR, NODE_INTEGRATION_DISABLED,
    NODE_INTEGRATION_ENABLED,
};
