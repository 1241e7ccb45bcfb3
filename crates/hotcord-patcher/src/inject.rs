use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use hotcord_core::ModuleLayout;

pub const INJECTION_DIR: &str = ".hotcord";
pub const INJECTION_FILE: &str = "injection.js";

const CSS_PLACEHOLDER: &str = "/* put your custom css here. */\n";
const JS_PLACEHOLDER: &str = "// put your custom js here.\n";

/// Resolved absolute paths to the user's stylesheet and script files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionConfig {
    css: PathBuf,
    js: PathBuf,
}

impl InjectionConfig {
    /// Absolutizes the user-supplied paths, defaulting to
    /// `discord-custom.css` / `discord-custom.js` beside the resolved
    /// modules directory.
    pub fn resolve(
        css: Option<PathBuf>,
        js: Option<PathBuf>,
        layout: &ModuleLayout,
    ) -> Result<Self> {
        Ok(Self {
            css: absolute(css.unwrap_or_else(|| layout.default_css()))?,
            js: absolute(js.unwrap_or_else(|| layout.default_js()))?,
        })
    }

    pub fn css(&self) -> &Path {
        &self.css
    }

    pub fn js(&self) -> &Path {
        &self.js
    }

    /// Creates both files with placeholder content when absent. Existing
    /// files are never touched.
    pub fn ensure_placeholders(&self) -> Result<()> {
        ensure_placeholder(&self.css, CSS_PLACEHOLDER)?;
        ensure_placeholder(&self.js, JS_PLACEHOLDER)
    }
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}

fn ensure_placeholder(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("failed to write placeholder: {}", path.display()))
}

pub fn user_home() -> Result<PathBuf> {
    if cfg!(windows) {
        let profile = std::env::var("USERPROFILE")
            .context("USERPROFILE is not set; cannot resolve home directory")?;
        return Ok(PathBuf::from(profile));
    }

    let home = std::env::var("HOME").context("HOME is not set; cannot resolve home directory")?;
    Ok(PathBuf::from(home))
}

/// Escapes a path for embedding inside a single-quoted JavaScript string.
pub fn escape_js_path(path: &Path) -> String {
    path.display()
        .to_string()
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
}

/// Renders the watcher payload executed inside the running application.
/// Clearing and tear-down are type-parameterized and the watcher handle is
/// stored back per kind, so at most one watcher exists per kind and
/// tearing down actually closes it.
pub fn injection_script(config: &InjectionConfig) -> String {
    INJECTION_TEMPLATE
        .replace("__CSS__", &escape_js_path(config.css()))
        .replace("__JS__", &escape_js_path(config.js()))
}

/// Renders the bootstrap snippet spliced into the main-window script; it
/// re-reads and executes the payload file on every `dom-ready`.
pub fn reload_hook(injection_file: &Path) -> String {
    RELOAD_HOOK_TEMPLATE.replace("__INJECTION__", &escape_js_path(injection_file))
}

/// Writes the payload to `<home>/.hotcord/injection.js`, creating the
/// directory on demand and overwriting any previous payload.
pub fn write_injection_script(home: &Path, config: &InjectionConfig) -> Result<PathBuf> {
    let dir = home.join(INJECTION_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(INJECTION_FILE);
    fs::write(&path, injection_script(config))
        .with_context(|| format!("failed to write injection payload: {}", path.display()))?;
    Ok(path)
}

const RELOAD_HOOK_TEMPLATE: &str = "\
mainWindow.webContents.on('dom-ready', function () {
  var _fs = require('fs');
  mainWindow.webContents.executeJavaScript(
    _fs.readFileSync('__INJECTION__', 'utf-8')
  );
});
";

const INJECTION_TEMPLATE: &str = r#"window._fs = require("fs");
window._path = require("path");
window._fileWatcher = { CSS: null, JS: null };
window._tags = { CSS: {}, JS: {} };

window.applyCSS = function(path, name) { window._apply(path, name, "CSS"); };
window.applyJS = function(path, name) { window._apply(path, name, "JS"); };

window._apply = function(path, name, type) {
    var elementType = type == "CSS" ? "style" : "script";
    var tags = window._tags[type];
    var content = window._fs.readFileSync(path, "utf-8");
    if (!tags.hasOwnProperty(name)) {
        tags[name] = document.createElement(elementType);
        document.head.appendChild(tags[name]);
    }
    tags[name].innerHTML = content;
};

window.clearCSS = function(name) { window._clear(name, "CSS"); };
window.clearJS = function(name) { window._clear(name, "JS"); };

window._clear = function(name, type) {
    var tags = window._tags[type];
    if (tags.hasOwnProperty(name)) {
        tags[name].innerHTML = "";
        tags[name].parentElement.removeChild(tags[name]);
        delete tags[name];
    }
};

window.watchCSS = function(path) { window._watch(path, "CSS"); };
window.watchJS = function(path) { window._watch(path, "JS"); };

window._watch = function(path, type) {
    if (window._fileWatcher[type] !== null) {
        window._tearDown(type);
    }

    var ext = "." + type.toLowerCase();
    var files, dirname;
    if (window._fs.lstatSync(path).isDirectory()) {
        files = window._fs.readdirSync(path);
        dirname = path;
    } else {
        files = [window._path.basename(path)];
        dirname = window._path.dirname(path);
    }

    for (var i = 0; i < files.length; i++) {
        if (files[i].endsWith(ext)) {
            window._apply(window._path.join(dirname, files[i]), files[i], type);
        }
    }

    window._fileWatcher[type] = window._fs.watch(path, { encoding: "utf-8" },
        function(eventType, filename) {
            if (!filename.endsWith(ext)) return;
            var target = window._path.join(dirname, filename);
            if (eventType === "rename" && !window._fs.existsSync(target)) {
                window._clear(filename, type);
            } else {
                window._apply(target, filename, type);
            }
        });
};

window.tearDownCSS = function() { window._tearDown("CSS"); };
window.tearDownJS = function() { window._tearDown("JS"); };

window._tearDown = function(type) {
    var tags = window._tags[type];
    for (var key in tags) {
        if (tags.hasOwnProperty(key)) {
            window._clear(key, type);
        }
    }
    if (window._fileWatcher[type] !== null) {
        window._fileWatcher[type].close();
        window._fileWatcher[type] = null;
    }
};

window.removeDuplicateCSS = function() {
    var styles = [].slice.call(document.getElementsByTagName("style"));
    var tags = window._tags.CSS;
    for (var key in tags) {
        if (!tags.hasOwnProperty(key)) continue;
        for (var i = 0; i < styles.length; i++) {
            if (styles[i] !== tags[key]
                && styles[i].innerText.localeCompare(tags[key].innerText) === 0) {
                styles[i].parentElement.removeChild(styles[i]);
            }
        }
    }
};

window.applyAndWatchCSS = function(path) { window.applyAndWatch(path, "CSS"); };
window.applyAndWatchJS = function(path) { window.applyAndWatch(path, "JS"); };

window.applyAndWatch = function(path, type) {
    window._tearDown(type);
    window._watch(path, type);
};

window.applyAndWatchCSS('__CSS__');
window.applyAndWatchJS('__JS__');
window.removeDuplicateCSS();
"#;
