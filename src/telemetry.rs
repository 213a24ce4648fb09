//! Tracing subscriber setup for binaries and demos.

use tracing_subscriber::EnvFilter;

/// Installs a formatted tracing subscriber honoring `RUST_LOG`.
///
/// Defaults to `info` when no filter is configured. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
