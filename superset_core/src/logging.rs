//! Tracing setup for the superset binary and the crate's tests.
//!
//! Composer decisions (filter fallback, chosen shape, swap pool) are emitted
//! as tracing events; this module only wires a subscriber for them.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the CLI subscriber
///
/// Only warnings (such as a filter fallback) are shown unless RUST_LOG asks
/// for more.
pub fn init() {
    init_with_level("warn")
}

/// Install a compact subscriber writing to stderr, filtered at
/// `default_level` unless RUST_LOG is set
///
/// Stdout is reserved for the workout itself, so `--json` output stays
/// parseable whatever the level.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Show composer debug events in the output of failing tests
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
