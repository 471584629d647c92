//! Tracing subscriber setup for binaries embedding the picker.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the host.

use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber, honouring `RUST_LOG` when it is set.
///
/// Calling this twice is harmless: the second install is skipped.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
