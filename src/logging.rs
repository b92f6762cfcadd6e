//! Logging setup.
//!
//! stdout carries the protocol, so logs always go to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the default filter.
pub const LOG_ENV: &str = "QUOTESEL_LOG";

/// Build the filter from `QUOTESEL_LOG`, falling back to `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global stderr subscriber.
pub fn init(default_directive: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))
}
