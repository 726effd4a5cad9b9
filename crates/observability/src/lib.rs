//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, formatter).
pub mod tracing;

pub use tracing::{LogConfig, LogFormat};

/// Initialize process-wide tracing from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(&LogConfig::from_env());
}
