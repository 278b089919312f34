//! Tracing subscriber initialization.
//!
//! Logs go to stderr; stdout carries the shell protocol.
//!
//! # Filter priority (highest to lowest)
//!
//! 1. `LINKMANAGER_LOG` env var
//! 2. `RUST_LOG` env var
//! 3. the configured `log_level`

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LINKMANAGER_LOG";

/// Installs the global subscriber. Returns `false` if one was already installed.
pub fn init(default_level: &str) -> bool {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(build_env_filter(default_level))
        .with(fmt_layer)
        .try_init()
        .is_ok()
}

/// Builds the filter, skipping env values that fail to parse.
pub fn build_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(directives) = std::env::var(LOG_ENV) {
        if let Ok(filter) = EnvFilter::try_new(&directives) {
            return filter;
        }
    }

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("info"))
}
