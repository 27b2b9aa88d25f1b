//! Helpers shared by the demo binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the log subscriber; set `RUST_LOG=debug` to see file I/O.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}
