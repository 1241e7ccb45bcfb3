/// Literal byte sequence marking the main window's blur-event registration
/// in the bootstrap script. The reload hook is inserted immediately before
/// it. Matching is exact; fuzzy matching risks corrupting unrelated bytes.
pub const BLUR_ANCHOR: &[u8] = b"mainWindow.on('blur'";

pub const NODE_INTEGRATION_DISABLED: &[u8] = b"nodeIntegration: false";
pub const NODE_INTEGRATION_ENABLED: &[u8] = b"nodeIntegration: true";

pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Replaces the first occurrence of `from` with `to`, leaving all other
/// bytes untouched. Returns the input unchanged when `from` is absent.
pub fn replace_first(source: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    match find_subslice(source, from) {
        Some(index) => {
            let mut out = Vec::with_capacity(source.len() - from.len() + to.len());
            out.extend_from_slice(&source[..index]);
            out.extend_from_slice(to);
            out.extend_from_slice(&source[index + from.len()..]);
            out
        }
        None => source.to_vec(),
    }
}

/// Pure splice transform: inserts `hook` immediately before the blur
/// anchor and flips the first node-integration flag from disabled to
/// enabled. All bytes outside those two edits are preserved verbatim.
/// Returns `None` when the anchor is not present.
pub fn splice_reload_hook(source: &[u8], hook: &[u8]) -> Option<Vec<u8>> {
    let anchor = find_subslice(source, BLUR_ANCHOR)?;

    let mut out = Vec::with_capacity(source.len() + hook.len());
    out.extend_from_slice(&source[..anchor]);
    out.extend_from_slice(hook);
    out.extend_from_slice(&source[anchor..]);

    Some(replace_first(
        &out,
        NODE_INTEGRATION_DISABLED,
        NODE_INTEGRATION_ENABLED,
    ))
}
