//! HTTP request dispatcher
//!
//! POSTs command bodies to a WebDriver server with reqwest.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::traits::RequestDispatcher;
use super::types::RawResponse;
use crate::Error;

/// reqwest-backed dispatcher
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    /// Server base URL without trailing slash (e.g., "http://localhost:4444/wd/hub")
    base_url: String,
    client: reqwest::Client,
}

impl HttpDispatcher {
    /// Create a dispatcher for a WebDriver server
    ///
    /// # Arguments
    /// * `base_url` - Server URL; paths such as `/session/abc/execute` are appended to it
    /// * `timeout` - Per-request timeout
    pub fn new<S: Into<String>>(base_url: S, timeout: Duration) -> Result<Self, Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Creating WebDriver HTTP dispatcher for {}", base_url);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RequestDispatcher for HttpDispatcher {
    async fn send(&self, path: &str, payload: Value) -> Result<RawResponse, Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Failed to send request to {}: {}", url, e)))?;

        let http_status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response from {}: {}", url, e)))?;

        debug!("Response from {}: HTTP {} ({} bytes)", url, http_status, body.len());

        // Error statuses still carry a JSON body describing the failure
        let mut raw: RawResponse = serde_json::from_slice(&body).map_err(|e| {
            Error::transport(format!(
                "Malformed response from {} (HTTP {}): {}",
                url, http_status, e
            ))
        })?;
        raw.http_status = Some(http_status);

        Ok(raw)
    }
}
