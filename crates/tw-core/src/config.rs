//! Configuration types and loading

use serde::{Deserialize, Serialize};

use crate::pagination::DEFAULT_PAGE_SIZE;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Query engine defaults
    pub query: QueryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Page size used when a query does not specify one
    pub default_page_size: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "plain" | "pretty" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

pub const ENV_DEFAULT_PAGE_SIZE: &str = "TENDERWATCH_DEFAULT_PAGE_SIZE";
pub const ENV_LOG: &str = "TENDERWATCH_LOG";
pub const ENV_LOG_FORMAT: &str = "TENDERWATCH_LOG_FORMAT";

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(size) = lookup(ENV_DEFAULT_PAGE_SIZE) {
            let parsed: i64 = size.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_DEFAULT_PAGE_SIZE.to_string(),
                message: format!("{:?} is not an integer", size),
            })?;
            if parsed < 1 {
                return Err(ConfigError::InvalidValue {
                    key: ENV_DEFAULT_PAGE_SIZE.to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
            config.query.default_page_size = parsed;
        }

        if let Some(filter) = lookup(ENV_LOG) {
            config.logging.filter = filter;
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            config.logging.format =
                LogFormat::from_str(&format).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_LOG_FORMAT.to_string(),
                    message: format!("expected text or json, got {:?}", format),
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.query.default_page_size, 10);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DEFAULT_PAGE_SIZE, "25"),
            (ENV_LOG, "debug,tw_queries=trace"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.query.default_page_size, 25);
        assert_eq!(config.logging.filter, "debug,tw_queries=trace");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_page_size() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_DEFAULT_PAGE_SIZE, "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = AppConfig::from_lookup(lookup(&[(ENV_DEFAULT_PAGE_SIZE, "0")])).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(AppConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).is_err());
    }
}
