//! HTTP fetch capability backed by a blocking `reqwest` client

use std::time::Duration;

use devfile_api::Devfile;
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::client::{ClientError, HttpClient};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches devfiles over HTTP(S) and decodes them as YAML or JSON
#[derive(Debug, Clone)]
pub struct HttpTemplateClient {
    client: Client,
}

impl HttpTemplateClient {
    /// Build a client with [`DEFAULT_TIMEOUT`]
    pub fn new() -> Result<Self, ClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("devfile-flattener/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one carrying proxy or TLS settings
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for HttpTemplateClient {
    fn fetch_template(&self, url: &str) -> Result<Devfile, ClientError> {
        tracing::debug!(url, "GET template");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/yaml, application/json, text/plain")
            .send()
            .map_err(|e| ClientError::other(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ClientError::other(format!("HTTP {status} from {url}")));
        }

        let body = response
            .text()
            .map_err(|e| ClientError::other(format!("failed to read body from {url}: {e}")))?;
        Devfile::from_yaml(&body)
            .map_err(|e| ClientError::other(format!("invalid devfile at {url}: {e}")))
    }
}
