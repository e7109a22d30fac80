//! Tracing subscriber initialisation
//!
//! `RUST_LOG` wins over the configured level when it is set.

use importdesk_domain::{ImportDeskError, LoggingConfig, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber: fmt output, text or JSON, filtered by
/// `RUST_LOG` or `config.level`.
///
/// # Errors
/// Returns `ImportDeskError::Config` if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_filter(config);

    let result = if config.json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .with(env_filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true).with_thread_names(true))
            .with(env_filter)
            .try_init()
    };

    result.map_err(|e| ImportDeskError::Config(format!("Failed to install tracing subscriber: {e}")))
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_an_error() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(ImportDeskError::Config(_))));
    }
}
