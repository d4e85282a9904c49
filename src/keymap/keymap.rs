//! Keymap and handler: ordered keybinds, first match wins

use std::fmt;

use super::binding::Keybind;
use super::config::{ActionBinding, KeymapConfig, KeymapError};
use super::event::{match_combination, match_keybind, KeyboardEvent};
use super::platform::ModifierResolver;

/// Ordered keybinds paired with a value
///
/// Lookup scans in insertion order and returns the first keybind that
/// matches; later bindings for an overlapping combination are unreachable.
#[derive(Debug, Clone)]
pub struct Keymap<A> {
    resolver: ModifierResolver,
    bindings: Vec<(Keybind, A)>,
}

impl<A> Keymap<A> {
    /// Create an empty keymap
    pub fn new(resolver: ModifierResolver) -> Self {
        Self {
            resolver,
            bindings: Vec::new(),
        }
    }

    /// Parse every raw keybind eagerly, keeping mapping order
    ///
    /// Fails on the first malformed keybind string.
    pub fn from_mapping<I, S>(resolver: ModifierResolver, mapping: I) -> Result<Self, KeymapError>
    where
        I: IntoIterator<Item = (S, A)>,
        S: AsRef<str>,
    {
        let mut keymap = Self::new(resolver);
        for (raw, value) in mapping {
            keymap.bind(raw.as_ref(), value)?;
        }
        Ok(keymap)
    }

    /// Parse and append one binding
    pub fn bind(&mut self, raw: &str, value: A) -> Result<&Keybind, KeymapError> {
        let keybind = Keybind::parse(raw, &self.resolver)?;
        tracing::debug!(
            "Registered keybind {} (flags: {:?})",
            keybind,
            keybind.flags().names()
        );
        self.bindings.push((keybind, value));
        Ok(&self.bindings[self.bindings.len() - 1].0)
    }

    /// Append an already parsed binding
    pub fn push(&mut self, keybind: Keybind, value: A) {
        self.bindings.push((keybind, value));
    }

    /// Index of the first binding the event triggers
    pub fn position<E: KeyboardEvent + ?Sized>(&self, event: &E) -> Option<usize> {
        self.bindings
            .iter()
            .position(|(keybind, _)| match_keybind(event, keybind, &self.resolver))
    }

    /// First binding the event triggers
    pub fn find<E: KeyboardEvent + ?Sized>(&self, event: &E) -> Option<(&Keybind, &A)> {
        let idx = self.position(event)?;
        let (keybind, value) = &self.bindings[idx];
        Some((keybind, value))
    }

    /// First binding whose key and modifiers match but which the focused
    /// element claims
    pub fn find_inhibited<E: KeyboardEvent + ?Sized>(&self, event: &E) -> Option<&Keybind> {
        self.bindings
            .iter()
            .map(|(keybind, _)| keybind)
            .find(|keybind| {
                match_combination(event, keybind, &self.resolver)
                    && !event.target().allows(keybind.flags())
            })
    }

    /// Value of the first binding the event triggers
    pub fn lookup<E: KeyboardEvent + ?Sized>(&self, event: &E) -> Option<&A> {
        self.find(event).map(|(_, value)| value)
    }

    pub fn bindings(&self) -> &[(Keybind, A)] {
        &self.bindings
    }

    pub fn resolver(&self) -> &ModifierResolver {
        &self.resolver
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Keymap<String> {
    /// Keymap of action names, dropping `Unbound` entries
    pub fn from_action_bindings(
        resolver: ModifierResolver,
        bindings: impl IntoIterator<Item = ActionBinding>,
    ) -> Self {
        let mut keymap = Self::new(resolver);
        for binding in bindings {
            if binding.is_unbound() {
                continue;
            }
            keymap.push(binding.keybind, binding.action);
        }
        keymap
    }

    pub fn from_config(resolver: ModifierResolver, config: KeymapConfig) -> Self {
        Self::from_action_bindings(resolver, config.bindings)
    }

    /// Keybind registered for an action (first match)
    pub fn keybind_for(&self, action: &str) -> Option<&Keybind> {
        self.bindings
            .iter()
            .find(|(_, a)| a == action)
            .map(|(keybind, _)| keybind)
    }
}

/// Callback invoked when its keybind fires
pub type KeybindListener<E> = Box<dyn FnMut(&mut E)>;

/// Event listener dispatching to the first matching callback
///
/// Bindings are parsed once at construction and never change; build a new
/// handler to change them.
pub struct KeybindHandler<E> {
    keymap: Keymap<KeybindListener<E>>,
    suppress_default: bool,
}

impl<E: KeyboardEvent> KeybindHandler<E> {
    /// Build a handler from `(keybind, callback)` pairs, in order
    ///
    /// With `suppress_default`, events whose default action was already
    /// prevented are ignored, and a firing binding prevents it.
    pub fn new<I, S, F>(
        resolver: ModifierResolver,
        mapping: I,
        suppress_default: bool,
    ) -> Result<Self, KeymapError>
    where
        I: IntoIterator<Item = (S, F)>,
        S: AsRef<str>,
        F: FnMut(&mut E) + 'static,
    {
        let keymap = Keymap::from_mapping(
            resolver,
            mapping
                .into_iter()
                .map(|(raw, listener)| (raw, Box::new(listener) as KeybindListener<E>)),
        )?;

        Ok(Self::from_keymap(keymap, suppress_default))
    }

    /// Build a handler over already parsed keybinds
    pub fn from_keymap(keymap: Keymap<KeybindListener<E>>, suppress_default: bool) -> Self {
        Self {
            keymap,
            suppress_default,
        }
    }

    /// Handle one event; returns whether a callback ran
    pub fn handle(&mut self, event: &mut E) -> bool {
        if self.suppress_default && event.default_prevented() {
            tracing::trace!("Ignoring {:?}: default already prevented", event.key());
            return false;
        }

        let Some(idx) = self.keymap.position(&*event) else {
            if !tracing::enabled!(tracing::Level::TRACE) {
                return false;
            }
            match self.keymap.find_inhibited(&*event) {
                Some(keybind) => tracing::trace!(
                    "Keybind {} inhibited by focused {}",
                    keybind,
                    event.target().category()
                ),
                None => tracing::trace!("No keybind for {:?}", event.key()),
            }
            return false;
        };

        if self.suppress_default {
            event.prevent_default();
        }

        let (keybind, listener) = &mut self.keymap.bindings[idx];
        tracing::trace!("Keybind {} fired", keybind);
        (*listener)(event);
        true
    }

    pub fn suppress_default(&self) -> bool {
        self.suppress_default
    }

    pub fn len(&self) -> usize {
        self.keymap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keymap.is_empty()
    }

    /// Parsed keybinds in dispatch order
    pub fn keybinds(&self) -> impl Iterator<Item = &Keybind> {
        self.keymap.bindings.iter().map(|(keybind, _)| keybind)
    }
}

impl<E> fmt::Debug for KeybindHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keybinds: Vec<String> = self
            .keymap
            .bindings
            .iter()
            .map(|(keybind, _)| keybind.to_string())
            .collect();
        f.debug_struct("KeybindHandler")
            .field("keybinds", &keybinds)
            .field("suppress_default", &self.suppress_default)
            .finish()
    }
}

/// Build an event handler from a `(keybind, callback)` mapping
pub fn create_keybind_handler<E, I, S, F>(
    resolver: ModifierResolver,
    mapping: I,
    suppress_default: bool,
) -> Result<KeybindHandler<E>, KeymapError>
where
    E: KeyboardEvent,
    I: IntoIterator<Item = (S, F)>,
    S: AsRef<str>,
    F: FnMut(&mut E) + 'static,
{
    KeybindHandler::new(resolver, mapping, suppress_default)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::keymap::context::FocusSpec;
    use crate::keymap::event::KeyEventSnapshot;
    use crate::keymap::platform::Platform;

    fn resolver() -> ModifierResolver {
        ModifierResolver::new(Platform::Other)
    }

    fn ctrl_s() -> KeyEventSnapshot {
        KeyEventSnapshot::new("s").with_code("KeyS").with_modifier("Control")
    }

    #[test]
    fn test_single_binding_lookup() {
        let keymap = Keymap::from_mapping(resolver(), [("$mod+s", "save")]).unwrap();

        assert_eq!(keymap.lookup(&ctrl_s()), Some(&"save"));
        assert_eq!(keymap.lookup(&KeyEventSnapshot::new("k")), None);
    }

    #[test]
    fn test_first_match_wins() {
        let keymap = Keymap::from_mapping(
            resolver(),
            [("$mod+s", "first"), ("Control+s", "second")],
        )
        .unwrap();

        assert_eq!(keymap.position(&ctrl_s()), Some(0));
        assert_eq!(keymap.lookup(&ctrl_s()), Some(&"first"));
    }

    #[test]
    fn test_mapping_order_is_kept() {
        let keymap =
            Keymap::from_mapping(resolver(), [("z", 1), ("a", 2), ("m", 3)]).unwrap();
        let keys: Vec<&str> = keymap.bindings().iter().map(|(kb, _)| kb.key()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_from_mapping_fails_on_malformed() {
        let result = Keymap::from_mapping(resolver(), [("a", 1), ("Shift+", 2)]);
        assert!(matches!(result, Err(KeymapError::MissingKey(_))));
    }

    #[test]
    fn test_find_inhibited_only_reports_focus_conflicts() {
        let keymap =
            Keymap::from_mapping(resolver(), [("$mod+s", "save"), ("$mod+z", "undo")]).unwrap();

        let undo_in_field = KeyEventSnapshot::new("z")
            .with_modifier("Control")
            .with_focus(FocusSpec::Input("text".into()));
        assert_eq!(keymap.lookup(&undo_in_field), None);
        assert_eq!(
            keymap.find_inhibited(&undo_in_field).map(|kb| kb.to_string()),
            Some("Control+z".to_string())
        );

        // Allowed match: nothing inhibited
        assert!(keymap.find_inhibited(&ctrl_s()).is_none());
        // No key match at all: nothing inhibited either
        let unbound = KeyEventSnapshot::new("q").with_focus(FocusSpec::TextArea);
        assert!(keymap.find_inhibited(&unbound).is_none());
    }

    #[test]
    fn test_keybind_for_action() {
        let keymap = Keymap::<String>::from_action_bindings(
            resolver(),
            [
                ActionBinding::new(Keybind::parse("$mod+s", &resolver()).unwrap(), "save"),
                ActionBinding::new(Keybind::parse("Escape", &resolver()).unwrap(), "Unbound"),
            ],
        );

        assert_eq!(keymap.len(), 1);
        assert_eq!(keymap.keybind_for("save").unwrap().to_string(), "Control+s");
        assert!(keymap.keybind_for("close").is_none());
    }

    #[test]
    fn test_handler_fires_once() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut handler = KeybindHandler::new(
            resolver(),
            [("$mod+s", move |_: &mut KeyEventSnapshot| c.set(c.get() + 1))],
            false,
        )
        .unwrap();

        let mut ev = ctrl_s();
        assert!(handler.handle(&mut ev));
        assert_eq!(count.get(), 1);
        assert!(!ev.default_prevented);
    }

    #[test]
    fn test_handler_suppress_default() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut handler = KeybindHandler::new(
            resolver(),
            [("$mod+s", move |_: &mut KeyEventSnapshot| c.set(c.get() + 1))],
            true,
        )
        .unwrap();

        let mut ev = ctrl_s();
        assert!(handler.handle(&mut ev));
        assert!(ev.default_prevented);

        // Already prevented upstream: ignored
        let mut ev = ctrl_s().prevented();
        assert!(!handler.handle(&mut ev));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_leaves_unmatched_event_untouched() {
        let mut handler = KeybindHandler::new(
            resolver(),
            [("$mod+s", |_: &mut KeyEventSnapshot| {})],
            true,
        )
        .unwrap();

        let mut ev = KeyEventSnapshot::new("s").with_focus(FocusSpec::TextArea);
        let before = ev.clone();
        assert!(!handler.handle(&mut ev));
        assert_eq!(ev, before);
    }

    #[test]
    fn test_handler_debug_lists_keybinds() {
        let handler: KeybindHandler<KeyEventSnapshot> =
            create_keybind_handler(resolver(), [("$mod+k", |_: &mut KeyEventSnapshot| {})], false)
                .unwrap();
        let debug = format!("{:?}", handler);
        assert!(debug.contains("Control+k"));
    }
}
