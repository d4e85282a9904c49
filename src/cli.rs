//! Command-line interface for keyguard
//!
//! Subcommands inspect keybinds and keymap files without a host:
//! - `explain`: how keybind strings parse and what they inhibit
//! - `check`: validate a keymap file and list its bindings
//! - `simulate`: run one synthetic key event through a keymap

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::keymap::{
    default_layer_paths, load_keymap_file, load_layered_keymap, FocusSpec, KeyEventSnapshot,
    Keybind, KeybindHandler, KeybindListener, Keymap, KeymapConfig, KeymapError, ModifierClass,
    ModifierResolver, Platform,
};

/// Inspect keybinds and keymap files
#[derive(Parser, Debug)]
#[command(name = "keyguard", version, about = "Inspect keybinds and keymap files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Platform used to resolve `$mod` (apple, windows, other; default: this machine)
    #[arg(long, global = true, value_name = "PLATFORM")]
    pub platform: Option<Platform>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log registration and loading details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show modifiers, key, modifier class and inhibit flags of keybinds
    Explain {
        #[arg(required = true, value_name = "KEYBIND")]
        keybinds: Vec<String>,
    },

    /// Load a keymap file and list each binding with its flags
    ///
    /// Without FILE, `./keymap.yaml` and the user keymap are merged.
    Check {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Report which action a key event would trigger
    Simulate {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Logical key, e.g. `s`, `Enter`, `ArrowLeft`
        #[arg(long)]
        key: String,

        /// Physical code (defaults to the key)
        #[arg(long)]
        code: Option<String>,

        /// Held modifiers, comma separated
        #[arg(long, value_delimiter = ',', value_name = "MODS")]
        mods: Vec<String>,

        /// Focused element: other, input:TYPE, textarea, select, button, anchor, anchor:none, editable
        #[arg(long, default_value = "other", value_name = "FOCUS")]
        focus: FocusSpec,
    },
}

impl Cli {
    pub fn resolver(&self) -> ModifierResolver {
        self.platform
            .map(ModifierResolver::new)
            .unwrap_or_else(ModifierResolver::current)
    }
}

/// One keybind as the parser sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeybindReport {
    pub input: String,
    pub resolved: String,
    pub modifiers: Vec<String>,
    pub key: String,
    pub class: ModifierClass,
    pub flags: Vec<&'static str>,
}

impl KeybindReport {
    pub fn new(input: &str, keybind: &Keybind, resolver: &ModifierResolver) -> Self {
        Self {
            input: input.to_string(),
            resolved: keybind.to_string(),
            modifiers: keybind.modifiers().to_vec(),
            key: keybind.key().to_string(),
            class: keybind.class(resolver),
            flags: keybind.flags().names(),
        }
    }
}

impl fmt::Display for KeybindReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.input)?;
        writeln!(f, "  resolved:  {}", self.resolved)?;
        writeln!(f, "  modifiers: [{}]", self.modifiers.join(", "))?;
        writeln!(f, "  key:       {}", self.key)?;
        writeln!(f, "  class:     {:?}", self.class)?;
        write!(f, "  inhibits:  {}", flag_list(&self.flags))
    }
}

/// A keymap after loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// The explicit file, or every default layer path
    pub sources: Vec<PathBuf>,
    pub platform: Platform,
    pub suppress_default: bool,
    pub bindings: Vec<BindingReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingReport {
    pub action: String,
    pub keybind: String,
    pub flags: Vec<&'static str>,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<String> = self
            .sources
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        writeln!(
            f,
            "{}: {} bindings (platform {}, suppress_default {})",
            sources.join(" + "),
            self.bindings.len(),
            self.platform,
            self.suppress_default
        )?;
        let width = self
            .bindings
            .iter()
            .map(|b| b.keybind.len())
            .max()
            .unwrap_or(0);
        for binding in &self.bindings {
            writeln!(
                f,
                "  {:width$}  {:<20} {}",
                binding.keybind,
                binding.action,
                flag_list(&binding.flags),
                width = width
            )?;
        }
        Ok(())
    }
}

/// Outcome of one synthetic event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulateReport {
    pub key: String,
    pub code: String,
    pub modifiers: Vec<String>,
    pub focus: String,
    pub action: Option<String>,
    /// Binding that matched the keys but was claimed by the focused element
    pub inhibited: Option<String>,
    pub default_prevented: bool,
}

impl fmt::Display for SimulateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut combo = self.modifiers.join("+");
        if !combo.is_empty() {
            combo.push('+');
        }
        combo.push_str(&self.key);

        match &self.action {
            Some(action) => write!(
                f,
                "{} (code {}) on {} → {}{}",
                combo,
                self.code,
                self.focus,
                action,
                if self.default_prevented {
                    " (default prevented)"
                } else {
                    ""
                }
            ),
            None => match &self.inhibited {
                Some(keybind) => write!(
                    f,
                    "{} (code {}) on {} → {} inhibited by focus",
                    combo, self.code, self.focus, keybind
                ),
                None => write!(
                    f,
                    "{} (code {}) on {} → no binding fires",
                    combo, self.code, self.focus
                ),
            },
        }
    }
}

fn flag_list(flags: &[&str]) -> String {
    if flags.is_empty() {
        "-".to_string()
    } else {
        flags.join(" | ")
    }
}

/// Parse each keybind string, stopping at the first malformed one
pub fn explain<S: AsRef<str>>(
    keybinds: &[S],
    resolver: &ModifierResolver,
) -> Result<Vec<KeybindReport>, KeymapError> {
    keybinds
        .iter()
        .map(|raw| {
            let raw = raw.as_ref();
            let keybind = Keybind::parse(raw, resolver)?;
            Ok(KeybindReport::new(raw, &keybind, resolver))
        })
        .collect()
}

/// Load `file`, or merge the default layers when no file is given
///
/// Returns the configuration and the paths it was read from.
pub fn load_keymap(
    file: Option<&Path>,
    resolver: &ModifierResolver,
) -> Result<(KeymapConfig, Vec<PathBuf>), KeymapError> {
    match file {
        Some(path) => {
            let config = load_keymap_file(path, resolver)?;
            tracing::info!(
                "Loaded keymap from {} ({} bindings)",
                path.display(),
                config.bindings.len()
            );
            Ok((config, vec![path.to_path_buf()]))
        }
        None => {
            let layers = default_layer_paths();
            let config = load_layered_keymap(KeymapConfig::default(), &layers, resolver);
            Ok((config, layers))
        }
    }
}

/// Load a keymap and describe every binding it keeps
pub fn check(file: Option<&Path>, resolver: &ModifierResolver) -> Result<CheckReport, KeymapError> {
    let (config, sources) = load_keymap(file, resolver)?;

    let bindings = config
        .bindings
        .iter()
        .map(|b| BindingReport {
            action: b.action.clone(),
            keybind: b.keybind.to_string(),
            flags: b.keybind.flags().names(),
        })
        .collect();

    Ok(CheckReport {
        sources,
        platform: resolver.platform(),
        suppress_default: config.suppress_default.unwrap_or(false),
        bindings,
    })
}

/// Dispatch `event` through a keymap the way a host handler would
pub fn simulate(
    file: Option<&Path>,
    resolver: &ModifierResolver,
    mut event: KeyEventSnapshot,
) -> Result<SimulateReport, KeymapError> {
    let (config, _) = load_keymap(file, resolver)?;
    let fired: Rc<RefCell<Option<String>>> = Rc::default();

    let mut keymap: Keymap<KeybindListener<KeyEventSnapshot>> = Keymap::new(*resolver);
    for binding in config.bindings {
        if binding.is_unbound() {
            continue;
        }
        let fired = fired.clone();
        let action = binding.action;
        keymap.push(
            binding.keybind,
            Box::new(move |_: &mut KeyEventSnapshot| {
                *fired.borrow_mut() = Some(action.clone());
            }),
        );
    }

    let inhibited = keymap.find_inhibited(&event).map(ToString::to_string);
    let mut handler =
        KeybindHandler::from_keymap(keymap, config.suppress_default.unwrap_or(false));
    handler.handle(&mut event);

    let action = fired.borrow_mut().take();
    Ok(SimulateReport {
        focus: event.focus.to_string(),
        key: event.key,
        code: event.code,
        modifiers: event.modifiers,
        action,
        inhibited,
        default_prevented: event.default_prevented,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn other() -> ModifierResolver {
        ModifierResolver::new(Platform::Other)
    }

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::parse_from([
            "keyguard",
            "simulate",
            "keymap.yaml",
            "--key",
            "s",
            "--mods",
            "Control,Shift",
            "--focus",
            "input:date",
            "--platform",
            "apple",
        ]);

        assert_eq!(cli.resolver().platform(), Platform::Apple);
        match cli.command {
            Commands::Simulate {
                file,
                key,
                mods,
                focus,
                code,
            } => {
                assert_eq!(file, Some(PathBuf::from("keymap.yaml")));
                assert_eq!(key, "s");
                assert_eq!(code, None);
                assert_eq!(mods, ["Control", "Shift"]);
                assert_eq!(focus, FocusSpec::Input("date".to_string()));
            }
            other => panic!("Expected simulate, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_file_is_optional() {
        let cli = Cli::parse_from(["keyguard", "check"]);
        assert!(matches!(cli.command, Commands::Check { file: None }));

        let cli = Cli::parse_from(["keyguard", "simulate", "--key", "Escape"]);
        assert!(matches!(cli.command, Commands::Simulate { file: None, .. }));
    }

    #[test]
    fn test_load_keymap_without_file_uses_default_layers() {
        let (config, sources) = load_keymap(None, &other()).unwrap();
        assert_eq!(sources, default_layer_paths());
        // Tests run from the package root, where the sample keymap lives
        assert!(config.bindings.iter().any(|b| b.action == "save"));
    }

    #[test]
    fn test_inhibited_report_display() {
        let report = SimulateReport {
            key: "z".to_string(),
            code: "KeyZ".to_string(),
            modifiers: vec!["Control".to_string()],
            focus: "textarea".to_string(),
            action: None,
            inhibited: Some("Control+z".to_string()),
            default_prevented: false,
        };
        assert_eq!(
            report.to_string(),
            "Control+z (code KeyZ) on textarea → Control+z inhibited by focus"
        );
    }

    #[test]
    fn test_cli_explain_requires_keybind() {
        assert!(Cli::try_parse_from(["keyguard", "explain"]).is_err());
        let cli = Cli::try_parse_from(["keyguard", "explain", "$mod+s", "--json"]).unwrap();
        assert!(cli.json);
    }

    #[test]
    fn test_explain_reports_flags() {
        let reports = explain(&["$mod+Enter", "Space"], &other()).unwrap();

        assert_eq!(reports[0].resolved, "Control+Enter");
        assert_eq!(reports[0].class, ModifierClass::ModOnly);
        assert_eq!(reports[0].flags, ["ENTER_EXTRA"]);
        assert_eq!(reports[1].flags, ["TEXT", "SELECT", "SPACE"]);
    }

    #[test]
    fn test_explain_stops_at_malformed() {
        let result = explain(&["a", "Shift+"], &other());
        assert!(matches!(result, Err(KeymapError::MissingKey(_))));
    }

    #[test]
    fn test_keybind_report_display() {
        let reports = explain(&["Escape"], &other()).unwrap();
        let text = reports[0].to_string();
        assert!(text.contains("key:       Escape"));
        assert!(text.contains("inhibits:  -"));
    }

    #[test]
    fn test_simulate_report_display() {
        let report = SimulateReport {
            key: "s".to_string(),
            code: "KeyS".to_string(),
            modifiers: vec!["Control".to_string()],
            focus: "other".to_string(),
            action: Some("save".to_string()),
            inhibited: None,
            default_prevented: true,
        };
        assert_eq!(
            report.to_string(),
            "Control+s (code KeyS) on other → save (default prevented)"
        );
    }
}
