//! Page download and raw document persistence.

use anyhow::Context;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::FetchSettings;
use crate::error::{Result, ScrapeError};
use crate::output::replace_file;

/// A successfully downloaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Source of raw page markup.
pub trait Fetch {
    fn fetch(&self, request: &FetchSettings) -> Result<FetchedPage>;
}

/// Single blocking GET, no retries.
pub struct HttpFetcher {
    client: Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, request: &FetchSettings) -> Result<FetchedPage> {
        info!("Fetching {}", request.url);

        let mut builder = self
            .client
            .get(&request.url)
            .timeout(Duration::from_secs(request.timeout_secs));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .with_context(|| format!("request failed for {}", request.url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: request.url.clone(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .with_context(|| format!("failed reading response for {}", request.url))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Page downloaded");

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
        })
    }
}

/// Write the raw markup to `path`, replacing whatever was there.
pub fn persist_document(path: &Path, body: &str) -> Result<()> {
    replace_file(path, |tmp_path| {
        fs::write(tmp_path, body)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))
    })
    .with_context(|| format!("Failed to persist raw document {}", path.display()))
}
