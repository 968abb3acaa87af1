//! Configuration for the Murmur API service.

use std::time::Duration;

use murmur_auth_core::{AuthConfig, RedisSettings};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Murmur API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Resource store URL
    pub database_url: String,

    /// Session store connection
    pub redis: RedisSettings,

    /// Session lifetime and store-call bound
    pub auth: AuthConfig,

    /// Whole-request budget; also the outer bound on every store call
    pub request_timeout: Duration,

    /// Metrics enabled
    pub metrics_enabled: bool,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let http_port = parse_or(&var, "HTTP_PORT", 1323)?;

        // Session store
        let redis = RedisSettings {
            addr: var("REDIS_ADDR").unwrap_or_else(|| "localhost:6379".to_string()),
            password: var("REDIS_PASSWORD").filter(|p| !p.is_empty()),
            db: parse_or(&var, "REDIS_DB", 0)?,
        };

        let token_ttl_secs: u64 = parse_or(&var, "TOKEN_TTL_SECS", 3 * 60 * 60)?;
        if token_ttl_secs == 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECS"));
        }
        let store_timeout_ms: u64 = parse_or(&var, "STORE_TIMEOUT_MS", 5_000)?;
        let request_timeout_secs: u64 = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30)?;

        let metrics_enabled = var("METRICS_ENABLED")
            .map(|v| v.parse().unwrap_or(true))
            .unwrap_or(true);

        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(_) => return Err(ConfigError::Invalid("LOG_FORMAT")),
        };

        let auth = AuthConfig::new()
            .with_token_ttl(Duration::from_secs(token_ttl_secs))
            .with_store_timeout(Duration::from_millis(store_timeout_ms));

        Ok(Self {
            http_port,
            database_url,
            redis,
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            log_format,
        })
    }
}

fn parse_or<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
