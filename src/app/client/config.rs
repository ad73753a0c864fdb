//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used against the Chrome-for-Testing endpoints. There is deliberately no
//! retry or rate-limiting layer: a single failure is reported to the caller,
//! who decides whether to re-invoke.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::http;
use crate::errors::TransportError;

/// Configuration for the HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout; also bounds the wait for the cross-process lock
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(http::DEFAULT_TIMEOUT_SECS),
            connect_timeout: http::CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given request timeout in seconds
    pub fn with_timeout_secs(timeout_secs: u64) -> Self {
        Self {
            request_timeout: Duration::from_secs(timeout_secs),
            ..Default::default()
        }
    }

    /// Builds the HTTP client with the specified configuration
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Build` if the client cannot be constructed
    pub fn build_http_client(&self) -> Result<Client, TransportError> {
        Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT)
            .build()
            .map_err(TransportError::Build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(
            config.request_timeout,
            Duration::from_secs(http::DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(config.connect_timeout, http::CONNECT_TIMEOUT);
    }

    #[test]
    fn test_client_config_custom_timeout() {
        let config = ClientConfig::with_timeout_secs(30);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, http::CONNECT_TIMEOUT);
    }

    #[test]
    fn test_http_client_creation() {
        let config = ClientConfig::default();
        let result = config.build_http_client();
        assert!(result.is_ok());
    }
}
