use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the JSON tracing subscriber, filtered by `RUST_LOG`.
///
/// Idempotent: a second call is a no-op, so tests and services can both
/// call it without coordination.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json())
        .try_init();
}
