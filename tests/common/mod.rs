//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use keyguard::keymap::{KeyEventSnapshot, ModifierResolver, Platform};

/// Resolver with `$mod` = Control
pub fn other() -> ModifierResolver {
    ModifierResolver::new(Platform::Other)
}

/// Resolver with `$mod` = Meta
pub fn apple() -> ModifierResolver {
    ModifierResolver::new(Platform::Apple)
}

/// Key event with the conventional `Key*` code for letters
pub fn key_event(key: &str) -> KeyEventSnapshot {
    let event = KeyEventSnapshot::new(key);
    match key.chars().next() {
        Some(c) if key.chars().count() == 1 && c.is_ascii_alphabetic() => {
            event.with_code(format!("Key{}", c.to_ascii_uppercase()))
        }
        _ => event,
    }
}

/// Names of fired callbacks, in order
pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

pub fn call_log() -> CallLog {
    Rc::default()
}

/// Callback that records `name` into `log`
pub fn record(log: &CallLog, name: &'static str) -> impl FnMut(&mut KeyEventSnapshot) + 'static {
    let log = log.clone();
    move |_: &mut KeyEventSnapshot| log.borrow_mut().push(name)
}

/// Write a keymap file into `dir`
pub fn write_keymap(dir: &Path, name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, yaml).unwrap();
    path
}
