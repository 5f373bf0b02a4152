//! Tracing/logging setup shared by binaries and tests that embed the tool-fleet crates.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat};

/// Initialize process-wide observability with the default JSON configuration.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&LogConfig::default());
}

/// Initialize process-wide observability with an explicit configuration.
pub fn init_with(config: &LogConfig) {
    tracing::init(config);
}
