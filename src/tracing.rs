//! Logging setup for the keyguard binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the embedding application. The binary calls [`init`].
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - registration and layer loading
//! - `RUST_LOG=keyguard::keymap=trace` - every dispatch decision

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize a console subscriber filtered by RUST_LOG (default `warn`)
///
/// `verbose` raises the default to `debug` when RUST_LOG is unset.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
