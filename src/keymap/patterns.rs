//! Key-name classification table
//!
//! Key names are an open vocabulary (letters, named keys, function keys), so
//! the parser classifies them by short case-sensitive markers instead of
//! enumerating every name. The markers are calibrated against the host's
//! key-name vocabulary: `Al` catches Alt and AltGraph, `Co` Control and
//! ContextMenu, `Lo` every `*Lock`, and so on.

/// One marker test against a key name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPattern {
    /// Marker appears anywhere in the name
    Contains(&'static str),
    /// Name starts with one of these characters
    StartsWithAny(&'static [char]),
    /// Name ends with the marker
    EndsWith(&'static str),
    /// An `F` immediately followed by a digit anywhere (F1..F24)
    FunctionKey,
}

impl KeyPattern {
    pub fn matches(self, key: &str) -> bool {
        match self {
            KeyPattern::Contains(marker) => key.contains(marker),
            KeyPattern::StartsWithAny(chars) => key.starts_with(chars),
            KeyPattern::EndsWith(marker) => key.ends_with(marker),
            KeyPattern::FunctionKey => key
                .as_bytes()
                .windows(2)
                .any(|w| w[0] == b'F' && w[1].is_ascii_digit()),
        }
    }
}

/// Whether any pattern in the set matches the key
pub fn matches_any(patterns: &[KeyPattern], key: &str) -> bool {
    patterns.iter().any(|p| p.matches(key))
}

use KeyPattern::{Contains, EndsWith, FunctionKey, StartsWithAny};

/// Standalone keys that never type text:
/// Alt, Control, Escape, F-keys, Meta, Tab, Enter, ScrollLock
pub const STANDALONE_TEXT_EXCLUSION: &[KeyPattern] = &[
    Contains("Al"),
    Contains("Co"),
    Contains("Es"),
    FunctionKey,
    Contains("Me"),
    Contains("Ta"),
    Contains("En"),
    Contains("Sc"),
];

/// Shifted keys that never type text:
/// Alt, Control, Escape, F-keys, Meta, Tab, Enter, Backspace, *Lock, Delete
pub const SHIFT_TEXT_EXCLUSION: &[KeyPattern] = &[
    Contains("Al"),
    Contains("Co"),
    Contains("Es"),
    FunctionKey,
    Contains("Me"),
    Contains("Ta"),
    Contains("En"),
    Contains("Ba"),
    Contains("Lo"),
    Contains("De"),
];

/// Standalone keys a `<select>` ignores. Backspace and Delete are excluded here
/// but not from [`STANDALONE_TEXT_EXCLUSION`].
pub const STANDALONE_SELECT_EXCLUSION: &[KeyPattern] = SHIFT_TEXT_EXCLUSION;

/// `$mod` shortcuts text fields handle themselves:
/// select all, copy, paste, cut, redo, undo, word jumps, word deletion
pub const MOD_TEXT_SHORTCUTS: &[KeyPattern] = &[
    StartsWithAny(&['a', 'c', 'v', 'x', 'y', 'z']),
    Contains("Ar"),
    Contains("Ba"),
];

/// `$mod+Shift` shortcuts text fields handle themselves:
/// paste as plain text, word selection
pub const MOD_SHIFT_TEXT_SHORTCUTS: &[KeyPattern] = &[EndsWith("V"), Contains("Ar")];

pub const ARROW_MARKER: KeyPattern = Contains("Ar");
pub const SPACE_MARKER: KeyPattern = Contains("Sp");
pub const ENTER_MARKER: KeyPattern = Contains("En");

/// Key name that anchors act on regardless of held modifiers
pub const ENTER_KEY: &str = "Enter";
