//! HTTP transport seam.
//!
//! Resolution is synchronous and best-effort, so the transport contract is
//! deliberately small: one blocking GET plus a lightweight existence probe.
//! Retry, caching and backoff belong to whoever implements [`Transport`],
//! not to this crate.

use anyhow::Context;

/// A fetched response: status code plus body text.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP collaborator used by locators and fetchers.
pub trait Transport: Send + Sync {
    /// Perform a GET and return status + body. Errors are transport-level
    /// (DNS, connect, read); HTTP error statuses come back as responses.
    fn get(&self, url: &str) -> anyhow::Result<HttpResponse>;

    /// Existence probe: does this URL answer with a success status?
    /// Transport failures count as "does not exist".
    fn exists(&self, url: &str) -> bool {
        self.get(url).map(|r| r.is_success()).unwrap_or(false)
    }
}

/// Default transport backed by a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("skillscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> anyhow::Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))?;
        Ok(HttpResponse { status, body })
    }
}
