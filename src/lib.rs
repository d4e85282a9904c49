//! keyguard - focus-aware keyboard shortcuts
//!
//! This crate parses compact keybind strings, works out which native
//! controls each keybind would collide with, and dispatches keyboard events
//! to the first matching binding unless the focused element owns the key.

pub mod cli;
pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use keymap::{
    create_keybind_handler, FocusTarget, InhibitFlags, KeyEventSnapshot, Keybind, KeybindHandler,
    KeyboardEvent, Keymap, KeymapError, ModifierResolver, Platform,
};
