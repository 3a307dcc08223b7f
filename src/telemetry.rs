//! Tracing setup for embedders.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is the embedding application's call. This helper wires up the standard
//! fmt subscriber driven by `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `RUST_LOG`.
///
/// Idempotent in practice: a second call finds the global subscriber
/// already set and is ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
