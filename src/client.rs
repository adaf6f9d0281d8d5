//! Blocking HTTP client for the price lookup service.
//!
//! Posts scan and search requests as JSON and decodes the shared
//! [`ScanResponse`] shape. HTTP status codes are not inspected: the service
//! reports failures in the body, so a 400 or 500 carrying `{"error": ...}`
//! decodes like any other response.

use crate::config;
use crate::error::Result;
use crate::models::{HealthStatus, ScanRequest, ScanResponse};
use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

// ---------------------------------------------------------------------------
// PriceLookup
// ---------------------------------------------------------------------------

/// The network seam of the controller.
///
/// [`PriceClient`] is the production implementation; tests substitute a
/// recording fake.
pub trait PriceLookup {
    /// Send a request to the `/scan` endpoint.
    fn scan(&mut self, request: &ScanRequest) -> Result<ScanResponse>;

    /// Send `{item_name}` to the `/search` endpoint.
    fn search(&mut self, item_name: &str) -> Result<ScanResponse>;
}

// ---------------------------------------------------------------------------
// PriceClient
// ---------------------------------------------------------------------------

/// Talks to the lookup service over HTTP.
pub struct PriceClient {
    /// Base URL all endpoint paths are joined onto (e.g. `http://localhost:5000/api`).
    pub base_url: String,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl PriceClient {
    /// Create a client for the given base URL.
    ///
    /// `timeout` of `None` means requests wait indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<&Client> {
        let client = match self.client.take() {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?,
        };
        Ok(&*self.client.insert(client))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn post<T: DeserializeOwned>(&mut self, path: &str, body: &ScanRequest) -> Result<T> {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let client = self.client()?.clone();
        let resp = client.post(&url).json(body).send()?;
        debug!("{} responded with {}", url, resp.status());
        let bytes = resp.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Query the service's `/health` endpoint, which lives at the server
    /// root rather than under `/api`.
    pub fn health(&mut self) -> Result<HealthStatus> {
        let url = format!("{}/{}", config::server_root(&self.base_url), config::HEALTH_PATH);
        debug!("GET {}", url);
        let client = self.client()?.clone();
        let bytes = client.get(&url).send()?.error_for_status()?.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Default for PriceClient {
    fn default() -> Self {
        Self::new(config::API_URL, None)
    }
}

impl PriceLookup for PriceClient {
    fn scan(&mut self, request: &ScanRequest) -> Result<ScanResponse> {
        self.post(config::SCAN_PATH, request)
    }

    fn search(&mut self, item_name: &str) -> Result<ScanResponse> {
        self.post(config::SEARCH_PATH, &ScanRequest::name(item_name))
    }
}
