use std::time::Duration;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_VAR: &str = "RUST_LOG";
pub const RESPONSE_TIMEOUT_VAR: &str = "RESPONSE_TIMEOUT_SECS";

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_RESPONSE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("RUST_LOG is not a valid tracing filter ({value:?}): {reason}")]
    InvalidLogFilter { value: String, reason: String },
}

/// Settings read once per Lambda container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub log_filter: String,
    pub response_timeout: Duration,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let log_filter = lookup(LOG_FILTER_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        if let Err(error) = EnvFilter::try_new(&log_filter) {
            return Err(ConfigError::InvalidLogFilter {
                value: log_filter,
                reason: error.to_string(),
            });
        }

        let response_timeout = match lookup(RESPONSE_TIMEOUT_VAR) {
            None => Duration::from_secs(DEFAULT_RESPONSE_TIMEOUT_SECS),
            Some(value) => match value.trim().parse::<u64>() {
                Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: RESPONSE_TIMEOUT_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            log_filter,
            response_timeout,
        })
    }
}
