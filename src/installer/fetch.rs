//! Downloading installer scripts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{Result, VenvupError};

/// Something that can download a script body.
pub trait ScriptFetcher {
    /// Fetch `url` and return the response body.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches scripts over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("venvup/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| VenvupError::Other(anyhow::anyhow!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl ScriptFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let failed = |message: String| VenvupError::InstallerFetchFailed {
            url: url.to_string(),
            message,
        };

        tracing::debug!("Fetching installer from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP {}", response.status())));
        }

        let body = response.text().map_err(|e| failed(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(failed("empty response body".to_string()));
        }
        Ok(body)
    }
}

/// Fetcher serving canned bodies, for tests.
///
/// Unknown URLs fail the way an unreachable host would.
#[derive(Debug, Default)]
pub struct MockFetcher {
    bodies: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn serve(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ScriptFetcher for MockFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| VenvupError::InstallerFetchFailed {
                url: url.to_string(),
                message: "connection refused".to_string(),
            })
    }
}
