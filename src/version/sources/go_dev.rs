//! go.dev download page implementation

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{DEFAULT_LISTING_URL, FETCH_TIMEOUT_MS};
use crate::version::error::CatalogError;
use crate::version::source::CatalogSource;

/// Fetches the HTML download page listing every Go release archive
pub struct GoDevSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl GoDevSource {
    /// Creates a source for a custom listing URL with a bounded timeout
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent("gvs")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            timeout,
        })
    }

    /// Source for `https://go.dev/dl/` with the default 5 second timeout
    pub fn with_defaults() -> Result<Self, CatalogError> {
        Self::new(
            DEFAULT_LISTING_URL,
            Duration::from_millis(FETCH_TIMEOUT_MS),
        )
    }

    fn map_error(&self, error: reqwest::Error) -> CatalogError {
        if error.is_timeout() {
            CatalogError::Timeout {
                after: self.timeout,
            }
        } else {
            CatalogError::Network(error)
        }
    }

    async fn download(&self) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Listing returned status {}: {}", status, self.url);
            return Err(CatalogError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read listing body: {}", e);
            if e.is_timeout() {
                CatalogError::Timeout {
                    after: self.timeout,
                }
            } else {
                CatalogError::InvalidResponse(e.to_string())
            }
        })?;

        Ok(body)
    }
}

#[async_trait::async_trait]
impl CatalogSource for GoDevSource {
    /// GETs the listing page; connecting, sending and reading the body all
    /// share one deadline.
    async fn fetch_listing(&self) -> Result<String, CatalogError> {
        debug!("Fetching release listing from {}", self.url);

        let body = tokio::time::timeout(self.timeout, self.download())
            .await
            .map_err(|_| {
                warn!("Listing request timed out after {:?}: {}", self.timeout, self.url);
                CatalogError::Timeout {
                    after: self.timeout,
                }
            })??;

        debug!("Fetched {} bytes from {}", body.len(), self.url);
        Ok(body)
    }
}
