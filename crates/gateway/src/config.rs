//! Gateway configuration.

use std::env;

use common::{ConfigError, UpstreamClientConfig, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS};

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// GraphQL identity service endpoint
    pub identity: UpstreamClientConfig,
    /// Incident module base URL
    pub incidents: UpstreamClientConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails when an upstream endpoint is missing; the gateway must not start
    /// without somewhere to send requests.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv(name))
        };
        let number = |name: &str, default: u64| {
            lookup(name)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        let connect_timeout_ms = number("UPSTREAM_CONNECT_TIMEOUT_MS", DEFAULT_CONNECT_TIMEOUT_MS);
        let request_timeout_ms = number("UPSTREAM_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS);
        let upstream = |endpoint: String| UpstreamClientConfig {
            endpoint,
            connect_timeout_ms,
            request_timeout_ms,
        };

        Ok(Self {
            identity: upstream(required("AUTH_URL")?),
            incidents: upstream(required("INCIDENT_SERVICE_URL")?),
            host: lookup("GATEWAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("GATEWAY_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
