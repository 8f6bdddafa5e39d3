//! Tracing setup for hosts embedding the library.
//!
//! The core only emits `tracing` events; installing a subscriber is the
//! host's call. This helper covers the common case of a compact stderr
//! subscriber filtered by `RUST_LOG`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact stderr subscriber
///
/// `default_level` applies when `RUST_LOG` is unset, e.g. `init("info")`.
/// Panics if a global subscriber is already installed.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Subscriber for unit tests; safe to call repeatedly
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
