//! Logging setup
//!
//! Installs the global tracing subscriber. The filter comes from `RUST_LOG`
//! when set, otherwise from the configured log level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogFormat;

/// Build the level filter for the given fallback level
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Initialize the tracing subscriber
///
/// Returns an error if a global subscriber was already installed.
pub fn init_tracing(log_level: &str, format: LogFormat) -> anyhow::Result<()> {
    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_filter(env_filter(log_level))
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_filter(env_filter(log_level))
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    Ok(())
}
