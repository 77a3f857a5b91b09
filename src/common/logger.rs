//! Tracing setup for the client binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `default_level` applies to this crate unless the `RUST_LOG` environment
/// variable overrides it.
pub fn init_tracing(default_level: &str) {
    let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}={}", crate_target, default_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
