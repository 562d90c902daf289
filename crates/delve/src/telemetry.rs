//! Tracing setup for binaries and tests.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,delve=debug";

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` if a global subscriber was already installed, which
/// happens when several tests call this; the existing one is kept.
pub fn init() -> bool {
    init_with(DEFAULT_FILTER)
}

/// Like [`init`], with a caller-chosen fallback filter.
pub fn init_with(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
