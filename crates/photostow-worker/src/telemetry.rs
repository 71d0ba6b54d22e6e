//! Tracing initialization for the worker binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with an env-filter, defaulting to
/// `photostow=info` when `RUST_LOG` is unset.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "photostow=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
