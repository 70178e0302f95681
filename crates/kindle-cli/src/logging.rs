//! Diagnostics for the `kindle` binary.
//!
//! The library crates emit spans and events; this module is the only place a
//! subscriber is installed. `-q` lowers the level to ERROR, each `-v` raises
//! it one step from WARN up to TRACE, and `RUST_LOG` replaces the computed
//! filter entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the chosen level.
const TARGETS: &[&str] = &["kindle", "kindle_core", "kindle_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
///
/// Reports go to stdout, diagnostics never do.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = level_for(args);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(level)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        // -vv and up: show which crate an event came from
        .with_target(args.verbose >= 2)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("could not install log subscriber: {e}"))
}

fn level_for(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter_for(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
