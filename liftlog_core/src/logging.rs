//! Logging infrastructure for liftlog.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a compact format.
///
/// Defaults to INFO; override with the RUST_LOG environment variable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
