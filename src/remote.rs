//! HTTP transport seam.
//!
//! Commands talk to the registry through [`RemoteSource`] so the pipeline
//! tests can swap the network for an in-memory map.

use crate::constants::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{CpmError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

pub trait RemoteSource: Send + Sync {
    /// Fetch `url`, returning the body on a 2xx response.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    fn fetch_text(&self, url: &str) -> Result<String> {
        let body = self.fetch(url)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| CpmError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl RemoteSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|e| CpmError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CpmError::RemoteFetch {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| CpmError::Network(e.to_string()))?;
        Ok(body.to_vec())
    }
}
