//! Tracing subscriber bootstrap for hosts embedding the editor.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// Returns `false` when a global subscriber was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter)
}

/// Install a fmt subscriber with explicit filter directives, ignoring `RUST_LOG`.
pub fn init_with_filter(directives: &str) -> bool {
    install(EnvFilter::new(directives))
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
