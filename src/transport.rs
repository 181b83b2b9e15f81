//! HTTP GET delivery of command URLs.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::config::HttpConfig;
use crate::error::TransportError;

pub trait Transport {
    /// Issue a GET and return the response body.
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to configure HTTP client ({e}), using defaults without timeouts");
                Client::new()
            });

        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                warn!("Nabaztag API request timed out");
            } else if e.is_connect() {
                warn!("Cannot connect to Nabaztag API");
            }
            TransportError::Request(Box::new(e))
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = resp.text().map_err(|e| TransportError::Body(Box::new(e)))?;
        debug!("Nabaztag API responded with {} bytes", body.len());
        Ok(body)
    }
}

/// Logs URLs instead of sending them.
pub struct DryRunTransport;

impl Transport for DryRunTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        info!("Dry run, not sending: {url}");
        Ok(String::new())
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        (**self).get(url)
    }
}
