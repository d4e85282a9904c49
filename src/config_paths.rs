//! Where keyguard looks for the user keymap
//!
//! `KEYGUARD_CONFIG_DIR` wins when set. Otherwise the platform config root
//! is used with a `keyguard/` subdirectory:
//! - Windows: `%APPDATA%\keyguard\`
//! - elsewhere: `$XDG_CONFIG_HOME/keyguard/`, falling back to `~/.config/keyguard/`

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

const APP_DIR: &str = "keyguard";
const KEYMAP_FILE: &str = "keymap.yaml";

/// Environment variable that replaces the whole config directory
pub const CONFIG_DIR_VAR: &str = "KEYGUARD_CONFIG_DIR";

/// Config directory read from the process environment
pub fn config_dir() -> Option<PathBuf> {
    resolve_config_dir(|name| env::var_os(name))
}

/// User keymap inside [`config_dir`]
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(KEYMAP_FILE))
}

/// Config directory for an arbitrary variable lookup
///
/// Empty values count as unset.
pub fn resolve_config_dir<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.is_empty()).map(PathBuf::from);

    if let Some(dir) = var(CONFIG_DIR_VAR) {
        return Some(dir);
    }

    let root = if cfg!(windows) {
        var("APPDATA")
    } else {
        var("XDG_CONFIG_HOME").or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    root.map(|root| root.join(APP_DIR))
}
