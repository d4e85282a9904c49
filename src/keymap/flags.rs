//! Inhibit flags: which focused controls must swallow a keybind

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Categories of focused element on which a keybind must not fire.
    ///
    /// A parsed keybind carries the set of categories whose native behaviour
    /// it would clash with. The focused element contributes the categories it
    /// is sensitive to; any overlap suppresses the keybind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct InhibitFlags: u8 {
        /// Elements accepting free text input
        const TEXT = 1 << 0;
        /// `<select>` elements
        const SELECT = 1 << 1;
        /// Controls navigating with Arrow keys (radio groups, range sliders)
        const ARROW = 1 << 2;
        /// Controls activated by Enter (buttons, picker-style inputs)
        const ENTER = 1 << 3;
        /// Anchors, which act on Enter even with extra modifiers held
        const ENTER_EXTRA = 1 << 4;
        /// Controls activated or toggled by Space (buttons, checkboxes, radios)
        const SPACE = 1 << 5;
    }
}

impl InhibitFlags {
    /// Whether a keybind carrying `self` may fire on an element sensitive to `element`
    #[inline]
    pub fn permits(self, element: InhibitFlags) -> bool {
        !self.intersects(element)
    }

    /// Flag names in declaration order, e.g. `["TEXT", "SELECT"]`
    pub fn names(self) -> Vec<&'static str> {
        self.iter_names().map(|(name, _)| name).collect()
    }
}
