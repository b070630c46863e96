//! HTTP client for downloading OpenSearch description documents

use super::user_agent::{accept_language, accept_opensearch, user_agent};
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper with description-download configuration
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with the given request timeout in seconds
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            user_agent: user_agent(),
        })
    }

    /// Download `url`, advertising the OpenSearch description media type and
    /// the caller's language. Non-success statuses are errors.
    pub async fn get_bytes(&self, url: &str, language: &str) -> Result<Vec<u8>, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_opensearch())
            .header("Accept-Language", accept_language(language))
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new(5);
        assert!(client.is_ok());
    }

    #[test]
    fn test_user_agent_carries_the_crate_version() {
        let client = HttpClient::new(5).unwrap();
        assert!(client.user_agent().contains(env!("CARGO_PKG_VERSION")));
    }
}
