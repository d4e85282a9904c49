//! Platform-dependent modifier resolution
//!
//! Decides what `$mod` stands for and which modifiers an AltGraph press may
//! stand in for. The result is an explicit value handed to the parser and
//! matcher, so tests can pick any platform without touching the host.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder resolved to the platform command modifier at parse time
pub const MOD_PLACEHOLDER: &str = "$mod";

/// Modifiers the host reports and the matcher checks for extraneous presses
pub const KNOWN_MODIFIERS: [&str; 4] = ["Alt", "Control", "Meta", "Shift"];

/// Device family, as far as keybinds care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// macOS, iPadOS, iOS
    Apple,
    Windows,
    #[default]
    Other,
}

impl Platform {
    /// Classify a host platform identifier such as `navigator.platform`
    ///
    /// `MacIntel`, `iPhone`, `iPad` and `iPod` are Apple; exactly `Win32` is
    /// Windows; anything else (including the empty string) is Other.
    pub fn from_platform_string(platform: &str) -> Self {
        if is_apple_identifier(platform) {
            Platform::Apple
        } else if platform == "Win32" {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// Platform of the compile target
    pub fn current() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::Apple
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Apple => "apple",
            Platform::Windows => "windows",
            Platform::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "apple" | "mac" | "macos" => Ok(Platform::Apple),
            "windows" | "win" => Ok(Platform::Windows),
            "other" | "linux" => Ok(Platform::Other),
            _ => Err(format!("Unknown platform: {} (expected apple, windows or other)", s)),
        }
    }
}

fn is_apple_identifier(platform: &str) -> bool {
    platform.contains("Mac")
        || platform
            .as_bytes()
            .windows(3)
            .any(|w| w[0] == b'i' && w[1] == b'P' && matches!(w[2], b'a' | b'h' | b'o'))
}

/// Resolved modifier aliases for one platform
///
/// Computed once and treated as immutable; every parse and match call takes
/// it by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierResolver {
    platform: Platform,
}

impl ModifierResolver {
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Resolver for the compile target
    pub fn current() -> Self {
        Self::new(Platform::current())
    }

    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// What `$mod` resolves to: `Meta` on Apple devices, `Control` elsewhere
    pub const fn mod_alias(&self) -> &'static str {
        match self.platform {
            Platform::Apple => "Meta",
            _ => "Control",
        }
    }

    /// Modifiers an AltGraph press counts as
    pub const fn alt_graph_aliases(&self) -> &'static [&'static str] {
        match self.platform {
            Platform::Windows => &["Alt", "Control"],
            Platform::Apple => &["Alt"],
            Platform::Other => &[],
        }
    }

    /// Replace the `$mod` placeholder, passing any other name through
    pub fn resolve<'a>(&self, token: &'a str) -> &'a str {
        if token == MOD_PLACEHOLDER {
            self.mod_alias()
        } else {
            token
        }
    }
}

impl Default for ModifierResolver {
    fn default() -> Self {
        Self::current()
    }
}
