//! Keyboard event seam and keybind matching
//!
//! Hosts implement [`KeyboardEvent`] for their native event type; the
//! matcher only reads from it, except for [`KeyboardEvent::prevent_default`]
//! which the dispatcher calls on a match.

use super::binding::Keybind;
use super::context::{FocusSpec, FocusTarget};
use super::flags::InhibitFlags;
use super::platform::{ModifierResolver, KNOWN_MODIFIERS};

/// A live keyboard event as seen by the matcher
pub trait KeyboardEvent {
    /// Logical key, e.g. `"a"`, `"A"`, `"Enter"`, `"ArrowLeft"`
    fn key(&self) -> &str;
    /// Physical key position, e.g. `"KeyA"`, `"Space"`
    fn code(&self) -> &str;
    /// Whether the named modifier (`"Shift"`, `"AltGraph"`, ...) is held
    fn modifier_state(&self, modifier: &str) -> bool;
    /// Whether something upstream already suppressed the default action
    fn default_prevented(&self) -> bool;
    /// Suppress the event's default action
    fn prevent_default(&mut self);
    /// The element holding focus
    fn target(&self) -> FocusTarget<'_>;
}

/// Whether a keybind with `flags` may be matched against this event's focus
pub fn is_keybind_allowed<E: KeyboardEvent + ?Sized>(event: &E, flags: InhibitFlags) -> bool {
    event.target().allows(flags)
}

/// Whether `modifier` counts as held, treating AltGraph as its platform aliases
pub fn match_modifier<E: KeyboardEvent + ?Sized>(
    event: &E,
    modifier: &str,
    resolver: &ModifierResolver,
) -> bool {
    event.modifier_state(modifier)
        || (event.modifier_state("AltGraph")
            && resolver
                .alt_graph_aliases()
                .iter()
                .any(|alias| *alias == modifier))
}

/// Whether the event triggers the keybind
///
/// The focused element must allow the keybind's flags, the key must equal
/// either the logical key or the physical code, every listed modifier must be
/// held, and no known modifier may be held that the keybind does not list.
pub fn match_keybind<E: KeyboardEvent + ?Sized>(
    event: &E,
    keybind: &Keybind,
    resolver: &ModifierResolver,
) -> bool {
    is_keybind_allowed(event, keybind.flags()) && match_combination(event, keybind, resolver)
}

/// Key and modifier half of [`match_keybind`], ignoring focus
pub fn match_combination<E: KeyboardEvent + ?Sized>(
    event: &E,
    keybind: &Keybind,
    resolver: &ModifierResolver,
) -> bool {
    (event.key() == keybind.key() || event.code() == keybind.key())
        && keybind
            .modifiers()
            .iter()
            .all(|m| match_modifier(event, m, resolver))
        && KNOWN_MODIFIERS
            .iter()
            .all(|m| keybind.has_modifier(m) || !match_modifier(event, m, resolver))
}

/// Plain-data keyboard event
///
/// Hosts without a native event type can translate into this; tests and the
/// CLI build it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEventSnapshot {
    pub key: String,
    pub code: String,
    pub modifiers: Vec<String>,
    pub focus: FocusSpec,
    pub default_prevented: bool,
}

impl KeyEventSnapshot {
    /// Event for `key` with `code` set to the same name
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: key.clone(),
            key,
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers.extend(modifiers.into_iter().map(Into::into));
        self
    }

    pub fn with_focus(mut self, focus: FocusSpec) -> Self {
        self.focus = focus;
        self
    }

    /// Mark the default action as already prevented upstream
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

impl KeyboardEvent for KeyEventSnapshot {
    fn key(&self) -> &str {
        &self.key
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn modifier_state(&self, modifier: &str) -> bool {
        self.modifiers.iter().any(|m| m == modifier)
    }

    fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn target(&self) -> FocusTarget<'_> {
        self.focus.as_target()
    }
}
