//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into keybinds paired with action names.

use std::path::Path;

use serde::Deserialize;

use super::binding::Keybind;
use super::platform::{ModifierResolver, Platform};

/// Action name that removes matching bindings from earlier layers
pub const UNBOUND_ACTION: &str = "Unbound";

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapFile {
    /// Suppress the event's default action when a binding fires
    #[serde(default)]
    pub suppress_default: Option<bool>,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub action: String,
    #[serde(default)]
    pub platform: Option<Platform>,
}

/// A parsed keybind and the action it triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub keybind: Keybind,
    pub action: String,
}

impl ActionBinding {
    pub fn new(keybind: Keybind, action: impl Into<String>) -> Self {
        Self {
            keybind,
            action: action.into(),
        }
    }

    /// Whether this entry removes bindings instead of adding one
    pub fn is_unbound(&self) -> bool {
        self.action == UNBOUND_ACTION
    }
}

/// A parsed keymap file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeymapConfig {
    /// `None` when the file leaves the choice to earlier layers
    pub suppress_default: Option<bool>,
    pub bindings: Vec<ActionBinding>,
}

/// Load a keymap from a YAML file
pub fn load_keymap_file(
    path: &Path,
    resolver: &ModifierResolver,
) -> Result<KeymapConfig, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::Io(e.to_string()))?;

    parse_keymap_yaml(&content, resolver)
}

/// Parse a keymap from a YAML string
///
/// Entries restricted to another platform are skipped.
pub fn parse_keymap_yaml(
    yaml: &str,
    resolver: &ModifierResolver,
) -> Result<KeymapConfig, KeymapError> {
    let file: KeymapFile =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::Parse(e.to_string()))?;

    let mut bindings = Vec::with_capacity(file.bindings.len());

    for entry in file.bindings {
        if let Some(platform) = entry.platform {
            if platform != resolver.platform() {
                tracing::debug!(
                    "Skipping binding {} for platform {}",
                    entry.key,
                    platform
                );
                continue;
            }
        }

        let action = entry.action.trim();
        if action.is_empty() {
            return Err(KeymapError::InvalidAction(entry.key));
        }

        let keybind = Keybind::parse(&entry.key, resolver)?;
        bindings.push(ActionBinding::new(keybind, action));
    }

    Ok(KeymapConfig {
        suppress_default: file.suppress_default,
        bindings,
    })
}

/// Errors that can occur when parsing keybinds and keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    Io(String),
    Parse(String),
    /// Nothing left after stripping whitespace
    EmptyKeybind(String),
    /// Trailing `+` or modifiers without a key
    MissingKey(String),
    /// Binding with an empty action name
    InvalidAction(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::Io(e) => write!(f, "IO error: {}", e),
            KeymapError::Parse(e) => write!(f, "Parse error: {}", e),
            KeymapError::EmptyKeybind(k) => write!(f, "Empty keybind: {:?}", k),
            KeymapError::MissingKey(k) => write!(f, "No key found in keybind: {:?}", k),
            KeymapError::InvalidAction(k) => write!(f, "Missing action for keybind: {}", k),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::flags::InhibitFlags;

    fn resolver() -> ModifierResolver {
        ModifierResolver::new(Platform::Other)
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: "$mod+s"
    action: save
  - key: "Escape"
    action: close
"#;

        let config = parse_keymap_yaml(yaml, &resolver()).unwrap();
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[0].action, "save");
        assert_eq!(config.bindings[0].keybind.modifiers(), ["Control"]);
        assert_eq!(config.bindings[1].action, "close");
        assert!(config.bindings[1].keybind.flags().is_empty());
        assert_eq!(config.suppress_default, None);
    }

    #[test]
    fn test_parse_yaml_suppress_default() {
        let yaml = r#"
suppress_default: true
bindings:
  - key: "Enter"
    action: submit
"#;

        let config = parse_keymap_yaml(yaml, &resolver()).unwrap();
        assert_eq!(config.suppress_default, Some(true));
        assert_eq!(config.bindings[0].keybind.flags(), InhibitFlags::ENTER);
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let yaml = r#"
bindings:
  - key: "$mod+s"
    action: save
  - key: "Meta+ArrowLeft"
    action: line_start
    platform: apple
  - key: "Home"
    action: line_start
    platform: other
"#;

        let config = parse_keymap_yaml(yaml, &resolver()).unwrap();
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[1].keybind.key(), "Home");

        let apple = ModifierResolver::new(Platform::Apple);
        let config = parse_keymap_yaml(yaml, &apple).unwrap();
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[1].keybind.key(), "ArrowLeft");
    }

    #[test]
    fn test_parse_yaml_rejects_malformed_keybind() {
        let yaml = r#"
bindings:
  - key: "Control+"
    action: nothing
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml, &resolver()),
            Err(KeymapError::MissingKey(_))
        ));
    }

    #[test]
    fn test_parse_yaml_rejects_empty_action() {
        let yaml = r#"
bindings:
  - key: "a"
    action: "  "
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml, &resolver()),
            Err(KeymapError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_parse_yaml_syntax_error() {
        let result = parse_keymap_yaml("bindings: [", &resolver());
        assert!(matches!(result, Err(KeymapError::Parse(_))));
    }

    #[test]
    fn test_unknown_platform_is_a_parse_error() {
        let yaml = r#"
bindings:
  - key: "a"
    action: x
    platform: amiga
"#;
        assert!(matches!(
            parse_keymap_yaml(yaml, &resolver()),
            Err(KeymapError::Parse(_))
        ));
    }

    #[test]
    fn test_unbound_marker() {
        let kb = Keybind::parse("a", &resolver()).unwrap();
        assert!(ActionBinding::new(kb.clone(), UNBOUND_ACTION).is_unbound());
        assert!(!ActionBinding::new(kb, "type").is_unbound());
    }

    #[test]
    fn test_error_display() {
        let err = KeymapError::MissingKey("Shift+".to_string());
        assert_eq!(err.to_string(), "No key found in keybind: \"Shift+\"");
    }
}
