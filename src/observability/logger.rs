//! Log subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured filter.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// Returns false if a subscriber was already installed, which happens when
/// tests or embedding code set one up first.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).try_init().is_ok()
}
