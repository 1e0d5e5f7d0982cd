//! Installer abstraction
//!
//! Installing a release is two external steps: build the per-version
//! downloader, then run it to populate the versions root.

#[cfg(test)]
use mockall::automock;

use crate::version::error::InstallError;
use crate::version::name::VersionName;

/// Trait for materializing a release under the versions root
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Installer: Send + Sync {
    /// Fetches or builds the downloader program for `version`
    async fn fetch_downloader(&self, version: &VersionName) -> Result<(), InstallError>;

    /// Runs the downloader, which unpacks the release into its directory
    async fn run_download(&self, version: &VersionName) -> Result<(), InstallError>;
}
