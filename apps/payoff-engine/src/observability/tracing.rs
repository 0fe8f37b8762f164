//! Tracing subscriber setup.
//!
//! Logs go to stderr so the report on stdout stays machine-readable.
//! `RUST_LOG` wins over the configured level when set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Error type for tracing setup.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// Configured level is not a valid filter directive.
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// The rejected directive.
        filter: String,
        /// Parser message.
        message: String,
    },
    /// Failed to initialize tracing subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the filter: `RUST_LOG` if set, else `payoff_engine=<level>`.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TracingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directive = format!("payoff_engine={}", config.level);
    EnvFilter::try_new(&directive).map_err(|e| TracingError::InvalidFilter {
        filter: directive,
        message: e.to_string(),
    })
}

/// Install the global subscriber in the configured format.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| TracingError::SubscriberError(e.to_string()))?;

    tracing::debug!(level = %config.level, format = %config.format, "Tracing initialized");
    Ok(())
}
