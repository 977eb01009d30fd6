//! Shared configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upstream connect timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;

/// Default upstream request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30000;

/// Startup configuration failures. Any of these aborts the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Upstream HTTP client connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamClientConfig {
    /// Service endpoint URL (e.g., "http://localhost:8080/graphql")
    pub endpoint: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl UpstreamClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
