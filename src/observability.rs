/// Tracing subscriber setup for binaries embedding this library
///
/// Call once at process start, before any spans are entered. Filtering is
/// driven by `RUST_LOG`; without it, library logs come through at debug.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber
///
/// Fails if a subscriber is already installed, which usually means it was
/// called twice.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdesk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}
