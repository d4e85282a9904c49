//! keyguard - inspect keybinds and keymap files from the command line

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use keyguard::cli::{self, Cli, Commands};
use keyguard::KeyEventSnapshot;

fn main() -> Result<()> {
    let args = Cli::parse();
    keyguard::tracing::init(args.verbose);

    let resolver = args.resolver();

    match &args.command {
        Commands::Explain { keybinds } => {
            let reports = cli::explain(keybinds.as_slice(), &resolver)?;
            if args.json {
                print_json(&reports)?;
            } else {
                for report in &reports {
                    println!("{}", report);
                }
            }
        }
        Commands::Check { file } => {
            let report = cli::check(file.as_deref(), &resolver)
                .with_context(|| format!("Invalid keymap {}", keymap_name(file)))?;
            if args.json {
                print_json(&report)?;
            } else {
                print!("{}", report);
            }
        }
        Commands::Simulate {
            file,
            key,
            code,
            mods,
            focus,
        } => {
            let mut event = KeyEventSnapshot::new(key.as_str())
                .with_modifiers(mods.iter().map(|m| m.trim()).filter(|m| !m.is_empty()))
                .with_focus(focus.clone());
            if let Some(code) = code {
                event = event.with_code(code.as_str());
            }

            let report = cli::simulate(file.as_deref(), &resolver, event)
                .with_context(|| format!("Invalid keymap {}", keymap_name(file)))?;
            if args.json {
                print_json(&report)?;
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

fn keymap_name(file: &Option<PathBuf>) -> String {
    match file {
        Some(path) => path.display().to_string(),
        None => "(default layers)".to_string(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
