//! Transport abstraction for issuing provider API calls.
//!
//! The dispatcher talks to upstream providers through this seam so the whole
//! aggregation pipeline can be exercised in tests without network access.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{Result, SearchError};

/// A fully rendered outbound provider call.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Complete URL including the rendered query string.
    pub url: String,
    /// Rendered request headers.
    pub headers: Vec<(String, String)>,
}

/// Trait for executing a provider call and returning its JSON payload.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues the call and returns the decoded JSON body.
    ///
    /// Implementations map non-2xx statuses to [`SearchError::Http`] and
    /// undecodable bodies to [`SearchError::Parse`].
    async fn fetch(&self, request: &ProviderRequest) -> Result<Value>;
}

/// HTTP transport backed by reqwest.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with default client settings.
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("pilot-search/0.1")
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Creates a transport with a custom reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &ProviderRequest) -> Result<Value> {
        let mut req = self.client.get(&request.url);
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))
    }
}
