//! Configuration management for the gateway.
//!
//! All configuration is read once at startup into an immutable [`Config`]
//! value and passed explicitly into the gateway; there is no ambient mutable
//! state. Environment variables are prefixed with `GATEWAY_` and a local
//! `.env` file is honored.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{Error, Result};
use super::transport::HttpConfig;

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Authentication gate configuration.
    pub auth: AuthConfig,

    /// Protocol behavior: debug detail exposure and pagination bounds.
    pub api: ApiConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub http: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported in log output.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Authentication gate configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The credential every request must present.
    pub api_key: String,

    /// Remote addresses allowed to call the gateway. Empty = unrestricted.
    pub allowed_ips: Vec<String>,
}

/// Custom Debug implementation to redact the credential from logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"[REDACTED]")
            .field("allowed_ips", &self.allowed_ips)
            .finish()
    }
}

/// Protocol behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// When set, internal error detail is attached to error envelopes.
    pub debug: bool,

    /// Page size applied when the caller does not send `limit`.
    pub default_limit: u64,

    /// Hard cap on page size; larger requests are clamped.
    pub max_limit: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "rest-gateway".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            auth: AuthConfig {
                api_key: "dev-api-key".to_string(),
                allowed_ips: Vec::new(),
            },
            api: ApiConfig {
                debug: false,
                default_limit: 50,
                max_limit: 100,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Fails when a numeric variable does not parse; a missing variable
    /// falls back to its default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("GATEWAY_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("GATEWAY_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(api_key) = std::env::var("GATEWAY_API_KEY") {
            config.auth.api_key = api_key;
        } else {
            warn!(
                "Using default API key. Set GATEWAY_API_KEY before exposing \
                 this gateway to anything but local development."
            );
        }

        if let Ok(ips) = std::env::var("GATEWAY_ALLOWED_IPS") {
            config.auth.allowed_ips = ips
                .split(',')
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(debug) = std::env::var("GATEWAY_DEBUG") {
            config.api.debug = parse_bool(&debug);
        }

        if let Ok(limit) = std::env::var("GATEWAY_DEFAULT_LIMIT") {
            config.api.default_limit = parse_number("GATEWAY_DEFAULT_LIMIT", &limit)?;
        }

        if let Ok(limit) = std::env::var("GATEWAY_MAX_LIMIT") {
            config.api.max_limit = parse_number("GATEWAY_MAX_LIMIT", &limit)?;
        }

        if config.api.max_limit == 0 {
            return Err(Error::config("GATEWAY_MAX_LIMIT must be at least 1"));
        }
        config.api.default_limit = config.api.default_limit.clamp(1, config.api.max_limit);

        config.http = HttpConfig::from_env()?;

        Ok(config)
    }
}

fn parse_bool(value: &str) -> bool {
    !matches!(value.to_lowercase().as_str(), "false" | "0" | "")
}

fn parse_number(name: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|_| Error::config(format!("{name} must be a number, got '{value}'")))
}
