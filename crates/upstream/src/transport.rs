//! Page transport abstraction and HTTP implementation
//!
//! The aggregator never talks to the network directly; it drives a
//! [`PageTransport`], which in production is a reqwest client and in tests a
//! scripted mock.

use crate::error::UpstreamError;
use async_trait::async_trait;
use lessonsearch_core::config::{CredentialScheme, UpstreamConfig};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::warn;

/// Transport for fetching one page of records from the upstream API
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Fetch the given page using `token` under one credential scheme
    ///
    /// # Returns
    /// The decoded JSON body on success. An HTTP 401 maps to
    /// [`UpstreamError::Unauthorized`]; every other fault maps to the
    /// timeout/transport/malformed-body variants.
    async fn fetch_page(
        &self,
        page: u32,
        token: &str,
        scheme: CredentialScheme,
    ) -> Result<Value, UpstreamError>;
}

/// HTTP page transport backed by reqwest
pub struct HttpPageTransport {
    client: Client,
    records_url: String,
}

impl HttpPageTransport {
    /// Create a transport for the configured upstream endpoint
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Config(format!("Failed to create HTTP client: {e}")))?;

        let records_url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            config.records_path
        );

        Ok(Self {
            client,
            records_url,
        })
    }
}

#[async_trait]
impl PageTransport for HttpPageTransport {
    async fn fetch_page(
        &self,
        page: u32,
        token: &str,
        scheme: CredentialScheme,
    ) -> Result<Value, UpstreamError> {
        let request = self.client.get(&self.records_url).query(&[("page", page)]);
        let request = match scheme {
            CredentialScheme::Bearer => {
                request.header("Authorization", format!("Bearer {token}"))
            }
            CredentialScheme::Token => request.header("token", token),
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout(format!("Page {page} request timed out: {e}"))
            } else if e.is_connect() {
                UpstreamError::Transport(format!("Page {page} connection failed: {e}"))
            } else {
                UpstreamError::Transport(format!("Page {page} request failed: {e}"))
            }
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(UpstreamError::Unauthorized(
                "upstream rejected the supplied token".to_string(),
            ));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            warn!("Records fetch for page {page} returned {status}: {error_text}");
            return Err(UpstreamError::Transport(format!(
                "upstream returned {status} for page {page}"
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            UpstreamError::MalformedBody(format!("Failed to decode page {page}: {e}"))
        })
    }
}
