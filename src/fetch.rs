//! HTTP retrieval of remote assets onto the local filesystem.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

/// Trait describing how remote assets are retrieved during localization.
///
/// The production implementation talks HTTP; tests substitute a recording
/// stub so documents can be rewritten without network access.
pub trait AssetFetcher {
    /// Retrieve `url` and persist the raw response body at `dest`.
    ///
    /// Performs no existence check; callers skip the call when the
    /// destination is already populated. Any transport error or non-success
    /// status is returned to the caller, which aborts the run.
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Fetcher backed by a blocking HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the crate's default client settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                "chat_export_localizer/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("failed to request {url}"))?
            .error_for_status()
            .with_context(|| format!("server rejected request for {url}"))?;

        let body = response
            .bytes()
            .with_context(|| format!("failed to read response body for {url}"))?;

        fs::write(dest, &body).with_context(|| format!("failed to write {}", dest.display()))?;

        Ok(())
    }
}
