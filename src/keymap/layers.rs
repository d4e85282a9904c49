//! Layered keymaps: base bindings plus file overrides
//!
//! Hosts usually ship a default keymap and let a project or user file
//! override parts of it. Later layers win.

use std::path::{Path, PathBuf};

use super::config::{load_keymap_file, ActionBinding, KeymapConfig};
use super::platform::ModifierResolver;

/// Merge override bindings into base bindings
///
/// - same modifier set + key as an existing binding → replaces it in place
/// - action `Unbound` → removes every matching base binding
/// - anything else → appended
pub fn merge_bindings(base: Vec<ActionBinding>, overrides: Vec<ActionBinding>) -> Vec<ActionBinding> {
    let mut result = base;

    for binding in overrides {
        if binding.is_unbound() {
            result.retain(|b| !b.keybind.same_combination(&binding.keybind));
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keybind.same_combination(&binding.keybind));

        if let Some(idx) = existing_idx {
            result[idx] = binding;
        } else {
            result.push(binding);
        }
    }

    result
}

/// Merge two parsed keymap files; the override's `suppress_default` wins when set
pub fn merge_configs(base: KeymapConfig, overrides: KeymapConfig) -> KeymapConfig {
    KeymapConfig {
        suppress_default: overrides.suppress_default.or(base.suppress_default),
        bindings: merge_bindings(base.bindings, overrides.bindings),
    }
}

/// Load and merge keymap files on top of `base`
///
/// Layers are applied in order. Missing files are skipped quietly; files
/// that fail to load or parse are logged and skipped.
pub fn load_layered_keymap<P: AsRef<Path>>(
    base: KeymapConfig,
    layers: &[P],
    resolver: &ModifierResolver,
) -> KeymapConfig {
    let mut config = base;

    for path in layers {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Keymap layer {} not found, skipping", path.display());
            continue;
        }

        match load_keymap_file(path, resolver) {
            Ok(layer) => {
                tracing::info!(
                    "Merging keymap from {} ({} bindings)",
                    path.display(),
                    layer.bindings.len()
                );
                config = merge_configs(config, layer);
            }
            Err(e) => {
                tracing::warn!("Failed to load keymap from {}: {}", path.display(), e);
            }
        }
    }

    config
}

/// Standard layer paths: `keymap.yaml` in the working directory, then the user keymap
pub fn default_layer_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("keymap.yaml")];
    if let Some(user) = crate::config_paths::keymap_file() {
        paths.push(user);
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::binding::Keybind;
    use crate::keymap::config::UNBOUND_ACTION;
    use crate::keymap::platform::Platform;

    fn bind(raw: &str, action: &str) -> ActionBinding {
        let resolver = ModifierResolver::new(Platform::Other);
        ActionBinding::new(Keybind::parse(raw, &resolver).unwrap(), action)
    }

    fn actions(bindings: &[ActionBinding]) -> Vec<&str> {
        bindings.iter().map(|b| b.action.as_str()).collect()
    }

    #[test]
    fn test_merge_empty_overrides_returns_base() {
        let base = vec![bind("$mod+s", "save"), bind("$mod+z", "undo")];
        let merged = merge_bindings(base.clone(), vec![]);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_adds_new_binding() {
        let merged = merge_bindings(vec![bind("$mod+s", "save")], vec![bind("$mod+o", "open")]);
        assert_eq!(actions(&merged), ["save", "open"]);
    }

    #[test]
    fn test_merge_overrides_in_place() {
        let base = vec![bind("$mod+s", "save"), bind("$mod+z", "undo")];
        let merged = merge_bindings(base, vec![bind("Control+s", "save_all")]);
        assert_eq!(actions(&merged), ["save_all", "undo"]);
    }

    #[test]
    fn test_merge_matches_modifiers_in_any_order() {
        let base = vec![bind("$mod+Shift+z", "redo")];
        let merged = merge_bindings(base, vec![bind("Shift+Control+z", "redo_all")]);
        assert_eq!(actions(&merged), ["redo_all"]);
    }

    #[test]
    fn test_merge_unbound_removes_binding() {
        let base = vec![bind("$mod+s", "save"), bind("Escape", "close")];
        let merged = merge_bindings(base, vec![bind("Escape", UNBOUND_ACTION)]);
        assert_eq!(actions(&merged), ["save"]);
    }

    #[test]
    fn test_merge_unbound_on_nonexistent_is_noop() {
        let base = vec![bind("$mod+s", "save")];
        let merged = merge_bindings(base.clone(), vec![bind("F1", UNBOUND_ACTION)]);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_configs_suppress_default() {
        let base = KeymapConfig {
            suppress_default: Some(true),
            bindings: vec![],
        };
        let merged = merge_configs(base.clone(), KeymapConfig::default());
        assert_eq!(merged.suppress_default, Some(true));

        let overrides = KeymapConfig {
            suppress_default: Some(false),
            bindings: vec![],
        };
        assert_eq!(merge_configs(base, overrides).suppress_default, Some(false));
    }

    #[test]
    fn test_missing_layers_are_skipped() {
        let resolver = ModifierResolver::new(Platform::Other);
        let base = KeymapConfig {
            suppress_default: None,
            bindings: vec![bind("$mod+s", "save")],
        };
        let merged = load_layered_keymap(
            base.clone(),
            &["/nonexistent/keyguard/keymap.yaml"],
            &resolver,
        );
        assert_eq!(merged, base);
    }

    #[test]
    fn test_default_layer_paths_start_local() {
        let paths = default_layer_paths();
        assert_eq!(paths[0], PathBuf::from("keymap.yaml"));
    }
}
