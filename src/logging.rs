//! Logging setup
//!
//! The library only emits `tracing` events. Embedders that want console
//! output call [`init`] once at startup; `RUST_LOG` takes precedence over the
//! `log_filter` setting.

use crate::config::GallerySettings;
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to `default_directive`
#[must_use]
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global fmt subscriber
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn init(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Install a global fmt subscriber using the settings' `log_filter`
pub fn init_from_settings(settings: &GallerySettings) -> bool {
    init(&settings.log_filter)
}
