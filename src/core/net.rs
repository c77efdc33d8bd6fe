// src/core/net.rs

// Blocking HTTP GET over one persistent client, with a fixed pause before
// every request.

use std::{thread, time::Duration};

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::ScrapeOptions;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("could not build HTTP client: {0}")]
    Client(String),
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("HTTP error: {status} {url}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {detail}")]
    Request { url: String, detail: String },
}

/// Anything that can GET a page body.
pub trait Fetch: Send + Sync {
    fn get(&self, url: &str) -> Result<String, TransportError>;
}

pub struct HttpFetcher {
    client: Client,
    delay: Duration,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { client, delay: opts.delay })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        thread::sleep(self.delay); // be polite

        debug!(url, "GET");
        let resp = self.client.get(url).send().map_err(|e| classify(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(|e| classify(url, e))
    }
}

fn classify(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout { url: s!(url) }
    } else {
        TransportError::Request { url: s!(url), detail: err.to_string() }
    }
}
