//! HTTP transport configuration.

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path for the gateway endpoint.
    #[serde(default = "default_path")]
    pub path: String,

    /// Emit permissive CORS headers for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/api".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Load transport config from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("GATEWAY_HTTP_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("GATEWAY_HTTP_PORT") {
            config.port = port.parse().map_err(|_| {
                Error::config(format!("GATEWAY_HTTP_PORT must be a port number, got '{port}'"))
            })?;
        }

        if let Ok(path) = std::env::var("GATEWAY_HTTP_PATH") {
            config.path = path;
        }

        if let Ok(cors) = std::env::var("GATEWAY_CORS") {
            config.enable_cors = cors.to_lowercase() != "false" && cors != "0";
        }

        Ok(config)
    }

    /// The socket address to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
