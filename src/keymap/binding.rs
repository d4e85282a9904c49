//! Keybind parsing: `"$mod+Shift+ArrowLeft"` → modifiers, key, inhibit flags

use std::fmt;

use serde::Serialize;

use super::config::KeymapError;
use super::flags::InhibitFlags;
use super::patterns::{
    matches_any, ARROW_MARKER, ENTER_KEY, ENTER_MARKER, MOD_SHIFT_TEXT_SHORTCUTS,
    MOD_TEXT_SHORTCUTS, SHIFT_TEXT_EXCLUSION, SPACE_MARKER, STANDALONE_SELECT_EXCLUSION,
    STANDALONE_TEXT_EXCLUSION,
};
use super::platform::ModifierResolver;

/// Shape of a keybind's modifier list, as far as inhibition cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierClass {
    /// No modifiers
    Standalone,
    /// Shift alone
    ShiftOnly,
    /// The `$mod` alias alone
    ModOnly,
    /// `$mod` and Shift
    ModShift,
    /// Anything else; never inhibited, matched literally
    Other,
}

impl ModifierClass {
    pub fn of<S: AsRef<str>>(modifiers: &[S], mod_alias: &str) -> Self {
        let has = |name: &str| modifiers.iter().any(|m| m.as_ref() == name);

        match modifiers {
            [] => ModifierClass::Standalone,
            [only] if only.as_ref() == "Shift" => ModifierClass::ShiftOnly,
            [only] if only.as_ref() == mod_alias => ModifierClass::ModOnly,
            [_, _] if has(mod_alias) && has("Shift") => ModifierClass::ModShift,
            _ => ModifierClass::Other,
        }
    }
}

/// A parsed keybind
///
/// Immutable once parsed. Flags are a pure function of the modifier class
/// and key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Keybind {
    modifiers: Vec<String>,
    key: String,
    flags: InhibitFlags,
}

impl Keybind {
    /// Parse a keybind string
    ///
    /// Whitespace is ignored and `$mod` is replaced by the resolver's alias.
    /// Tokens split on a `+` that follows a word character, so `"Shift++"`
    /// binds the `+` key. The last token is the key; the rest are modifiers,
    /// kept in the order given (duplicates included).
    pub fn parse(raw: &str, resolver: &ModifierResolver) -> Result<Self, KeymapError> {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(KeymapError::EmptyKeybind(raw.to_string()));
        }

        let mut tokens: Vec<String> = split_tokens(&compact)
            .into_iter()
            .map(|token| resolver.resolve(token).to_string())
            .collect();

        let key = match tokens.pop() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(KeymapError::MissingKey(raw.to_string())),
        };

        let class = ModifierClass::of(&tokens, resolver.mod_alias());
        let flags = inhibit_flags(class, &key);

        Ok(Self {
            modifiers: tokens,
            key,
            flags,
        })
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn flags(&self) -> InhibitFlags {
        self.flags
    }

    /// Whether the modifier list names `modifier` (exact, case-sensitive)
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    /// Modifier class relative to the resolver's `$mod` alias
    pub fn class(&self, resolver: &ModifierResolver) -> ModifierClass {
        ModifierClass::of(&self.modifiers, resolver.mod_alias())
    }

    /// Same modifier set (order-insensitive) and key
    pub fn same_combination(&self, other: &Keybind) -> bool {
        if self.key != other.key || self.modifiers.len() != other.modifiers.len() {
            return false;
        }
        let mut a: Vec<&str> = self.modifiers.iter().map(String::as_str).collect();
        let mut b: Vec<&str> = other.modifiers.iter().map(String::as_str).collect();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        write!(f, "{}", self.key)
    }
}

/// Split on every `+` preceded by an ASCII word character
fn split_tokens(compact: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev_is_word = false;

    for (idx, ch) in compact.char_indices() {
        if ch == '+' && prev_is_word {
            tokens.push(&compact[start..idx]);
            start = idx + 1;
        }
        prev_is_word = ch.is_ascii_alphanumeric() || ch == '_';
    }
    tokens.push(&compact[start..]);
    tokens
}

/// Inhibit flags for a modifier class and key name
pub fn inhibit_flags(class: ModifierClass, key: &str) -> InhibitFlags {
    use ModifierClass::*;

    let mut flags = InhibitFlags::empty();

    let text = match class {
        Standalone => !matches_any(STANDALONE_TEXT_EXCLUSION, key),
        ShiftOnly => !matches_any(SHIFT_TEXT_EXCLUSION, key),
        ModOnly => matches_any(MOD_TEXT_SHORTCUTS, key),
        ModShift => matches_any(MOD_SHIFT_TEXT_SHORTCUTS, key),
        Other => false,
    };
    flags.set(InhibitFlags::TEXT, text);

    if class == Standalone {
        flags.set(
            InhibitFlags::SELECT,
            !matches_any(STANDALONE_SELECT_EXCLUSION, key),
        );
        flags.set(InhibitFlags::ARROW, ARROW_MARKER.matches(key));
        flags.set(InhibitFlags::SPACE, SPACE_MARKER.matches(key));
        flags.set(InhibitFlags::ENTER, ENTER_MARKER.matches(key));
    }

    if matches!(class, ShiftOnly | ModOnly | ModShift) && key == ENTER_KEY {
        flags.insert(InhibitFlags::ENTER_EXTRA);
    }

    flags
}
