//! HTTP client for the Chrome-for-Testing endpoints
//!
//! Thin wrapper around `reqwest` providing the three fetch shapes the
//! version and link resolvers need: trimmed text, strict JSON, and
//! optional JSON where a 404 means "no such document" rather than a
//! transport failure. Timeouts come from [`ClientConfig`]; there is no
//! retry logic anywhere in this client.

use serde::de::DeserializeOwned;
use url::Url;

pub mod config;

pub use config::ClientConfig;

use crate::errors::TransportError;

/// HTTP client for interacting with the version index and download hosts
#[derive(Debug, Clone)]
pub struct DriverClient {
    client: reqwest::Client,
}

impl DriverClient {
    /// Creates a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Build` if the underlying HTTP client cannot
    /// be constructed
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = config.build_http_client()?;
        Ok(Self { client })
    }

    /// Fetches a plain-text endpoint and returns the trimmed body
    ///
    /// Used for the `LATEST_RELEASE_<CHANNEL>` endpoints, which answer with
    /// a bare version string.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on connection failure or non-success status
    pub async fn get_text(&self, url: &Url) -> Result<String, TransportError> {
        let response = self.get_checked(url).await?;
        let body = response.text().await.map_err(|source| TransportError::Http {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!("fetched text endpoint {}", url);
        Ok(body.trim().to_string())
    }

    /// Fetches a JSON document, treating every failure as a transport error
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on connection failure, non-success status,
    /// or a body that does not match `T`
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, TransportError> {
        let response = self.get_checked(url).await?;
        Self::parse_json(url, response).await
    }

    /// Fetches a JSON document that may legitimately not exist
    ///
    /// A 404 answer yields `Ok(None)`: the source was reachable, it just
    /// has no such document. Every other failure is a `TransportError`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on connection failure, a non-404 error
    /// status, or a body that does not match `T`
    pub async fn get_json_opt<T: DeserializeOwned>(
        &self,
        url: &Url,
    ) -> Result<Option<T>, TransportError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| TransportError::Http {
                url: url.to_string(),
                source,
            })?;

        if response.status().as_u16() == 404 {
            tracing::debug!("no document at {}", url);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Self::parse_json(url, response).await.map(Some)
    }

    /// Downloads the full response body into memory
    ///
    /// Driver archives are a few megabytes, so buffering them is fine and
    /// keeps the later filesystem critical section free of network I/O.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on connection failure or non-success status
    pub async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let response = self.get_checked(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Http {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!("fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// Issues a GET and maps non-success statuses to `TransportError::Status`
    async fn get_checked(&self, url: &Url) -> Result<reqwest::Response, TransportError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| TransportError::Http {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }

    /// Reads a response body and deserializes it as `T`
    async fn parse_json<T: DeserializeOwned>(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let body = response.text().await.map_err(|source| TransportError::Http {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| TransportError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::default();
        let result = DriverClient::new(&config);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on this port; the request must fail as Http, not
        // panic or hang past the connect timeout.
        let config = ClientConfig {
            connect_timeout: std::time::Duration::from_millis(200),
            request_timeout: std::time::Duration::from_millis(500),
        };
        let client = DriverClient::new(&config).unwrap();
        let url = Url::parse("http://127.0.0.1:9/LATEST_RELEASE_STABLE").unwrap();

        let result = client.get_text(&url).await;
        match result {
            Err(TransportError::Http { url, .. }) => {
                assert!(url.contains("LATEST_RELEASE_STABLE"));
            }
            other => panic!("expected TransportError::Http, got {:?}", other),
        }
    }
}
