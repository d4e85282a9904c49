//! Keybind parsing and focus-aware dispatch
//!
//! This module provides a keybinding system that:
//! - Parses compact keybind strings (`"$mod+Shift+ArrowLeft"`)
//! - Resolves `$mod` per platform (Meta on Apple, Control elsewhere)
//! - Works out which native controls a keybind would collide with
//! - Skips keybinds the focused element would handle itself
//! - Loads named-action keymaps from layered YAML files
//!
//! # Architecture
//!
//! ```text
//! KeyboardEvent → focus allows flags? → key/modifiers match → first binding → callback / action
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let resolver = ModifierResolver::current();
//! let mut handler = create_keybind_handler(
//!     resolver,
//!     [("$mod+s", |_: &mut KeyEventSnapshot| save())],
//!     true,
//! )?;
//! handler.handle(&mut event);
//! ```

mod binding;
mod config;
mod context;
mod event;
mod flags;
#[allow(clippy::module_inception)]
mod keymap;
mod layers;
mod patterns;
mod platform;
#[cfg(feature = "web")]
mod web_adapter;

pub use binding::{inhibit_flags, Keybind, ModifierClass};
pub use config::{
    load_keymap_file, parse_keymap_yaml, ActionBinding, BindingConfig, KeymapConfig, KeymapError,
    KeymapFile, UNBOUND_ACTION,
};
pub use context::{classify, input_type_flags, ElementCategory, FocusSpec, FocusTarget};
pub use event::{
    is_keybind_allowed, match_combination, match_keybind, match_modifier, KeyEventSnapshot,
    KeyboardEvent,
};
pub use flags::InhibitFlags;
pub use keymap::{create_keybind_handler, KeybindHandler, KeybindListener, Keymap};
pub use layers::{default_layer_paths, load_layered_keymap, merge_bindings, merge_configs};
pub use patterns::KeyPattern;
pub use platform::{ModifierResolver, Platform, KNOWN_MODIFIERS, MOD_PLACEHOLDER};
#[cfg(feature = "web")]
pub use web_adapter::DomKeyEvent;
