//! Remote release catalog
//!
//! Scrapes source-archive filenames (`go<version>.src.tar.gz`) out of the
//! listing document. The page mentions each release several times, so
//! results are deduplicated while keeping first-seen order.

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, info};

use crate::version::error::CatalogError;
use crate::version::name::VersionName;
use crate::version::source::CatalogSource;

pub struct RemoteCatalog {
    source: Arc<dyn CatalogSource>,
    /// Regex for a source archive filename: `go1.21.0.src.tar.gz`
    archive_re: Regex,
}

impl RemoteCatalog {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            archive_re: Regex::new(r"go(\d+\.\d+(?:\.\d+)?)\.src\.tar\.gz").unwrap(),
        }
    }

    /// Fetches the listing and returns up to `limit` distinct releases.
    ///
    /// `limit <= 0` means no cap. An empty result is not an error.
    pub async fn fetch_top(&self, limit: i64) -> Result<Vec<VersionName>, CatalogError> {
        let body = self.source.fetch_listing().await?;
        let versions = self.extract_versions(&body, limit);
        info!("Found {} remote versions", versions.len());
        Ok(versions)
    }

    /// Extracts distinct versions from `body` in document order.
    pub fn extract_versions(&self, body: &str, limit: i64) -> Vec<VersionName> {
        let cap = usize::try_from(limit).ok().filter(|&n| n > 0);

        let mut seen = HashSet::new();
        let mut versions = Vec::new();

        for captures in self.archive_re.captures_iter(body) {
            let version = VersionName::new(&captures[1]);
            if !seen.insert(version.clone()) {
                continue;
            }

            versions.push(version);

            if cap.is_some_and(|cap| versions.len() >= cap) {
                debug!("Reached limit of {} versions", limit);
                break;
            }
        }

        versions
    }
}
