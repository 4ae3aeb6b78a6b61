//! # duygu-logging
//!
//! `tracing` subscriber setup.
//!
//! Output goes to stderr, compact text by default or JSON lines when
//! `logging.json` is set. `RUST_LOG` takes precedence over the configured
//! level so individual targets can be turned up without editing settings.

#![deny(unsafe_code)]

use duygu_settings::{LogLevel, LoggingSettings};
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from logging settings.
///
/// Call once at startup. Subsequent calls are no-ops.
pub fn init(settings: &LoggingSettings) {
    init_subscriber(settings.level, settings.json);
}

/// Initialize the global subscriber with an explicit level and format.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_subscriber(level: LogLevel, json: bool) {
    let filter = build_filter(level);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    // try_init fails if a global subscriber is already set; keep the first one.
    let installed = if json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.compact().try_init()
    };
    if installed.is_ok() {
        tracing::debug!(level = level.as_filter_str(), json, "logging initialized");
    }
}

/// `RUST_LOG` if set and valid, otherwise `level` for every target.
fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()))
}
