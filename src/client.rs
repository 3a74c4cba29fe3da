use reqwest::Client;
use tracing::debug;

use crate::error::ScanError;
use crate::types::ScanRequest;

/// Fixed path of the scan engine's API.
pub const SCAN_ENDPOINT: &str = "/api/scan";

/// Raw HTTP answer from the scan engine, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers one scan request to the engine.
///
/// Implementations report only failures to complete the exchange
/// ([`ScanError::Network`] or [`ScanError::Transport`]); any received
/// status is returned as-is.
pub trait ScanTransport {
    async fn post_scan(&self, request: &ScanRequest) -> Result<HttpReply, ScanError>;
}

/// `reqwest` transport posting JSON to `{base_url}/api/scan`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, SCAN_ENDPOINT)
    }
}

impl ScanTransport for HttpTransport {
    async fn post_scan(&self, request: &ScanRequest) -> Result<HttpReply, ScanError> {
        let url = self.endpoint_url();
        // `json` sets `Content-Type: application/json`.
        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status().as_u16();
        debug!(%url, status, "received scan response");
        let body = response.text().await?;
        Ok(HttpReply { status, body })
    }
}
