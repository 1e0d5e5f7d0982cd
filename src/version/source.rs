//! Source of the raw release listing

#[cfg(test)]
use mockall::automock;

use crate::version::error::CatalogError;

/// Trait for fetching the document remote releases are scraped from
///
/// Kept separate from the extraction logic in [`crate::version::catalog`]
/// so the HTML page can be swapped for a structured feed.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the whole listing body as text
    ///
    /// # Returns
    /// * `Ok(String)` - The document body
    /// * `Err(CatalogError)` - Transport failure, timeout or non-success status
    async fn fetch_listing(&self) -> Result<String, CatalogError>;
}
