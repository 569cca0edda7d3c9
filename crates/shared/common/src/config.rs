//! Shared configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default connect timeout for outbound HTTP calls
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;

/// Default total request timeout for outbound HTTP calls
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

/// Outbound HTTP client configuration.
///
/// Both timeouts are always applied; a request is never left unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl HttpClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}
