use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for the remote listing fetch in milliseconds (5 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 5_000;

/// Overall budget for both installer steps in milliseconds (5 minutes)
pub const INSTALL_TIMEOUT_MS: u64 = 5 * 60 * 1000;

// =============================================================================
// Catalog and layout constants
// =============================================================================

/// Page listing every published Go release archive
pub const DEFAULT_LISTING_URL: &str = "https://go.dev/dl/";

/// Number of remote versions printed by `list-remote` when no limit is given
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Prefix every canonical release name carries
pub const VERSION_PREFIX: &str = "go";

/// Name of the toolchain entry point, both inside a release and for the active link
pub const ENTRY_POINT: &str = "go";

/// File the golang.org/dl downloader writes once a release is fully unpacked
pub const COMPLETION_MARKER: &str = ".unpacked-success";

/// Directory (relative to home) holding gvs' own state
pub const GVS_DIR: &str = ".gvs";

/// Environment variable holding the tracing filter directive
pub const LOG_ENV: &str = "GVS_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine the current user's home directory")]
    HomeNotFound,

    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Optional user configuration, read from `~/.gvs/config.json`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GvsConfig {
    /// Page scraped for available releases
    pub listing_url: String,
    /// Remote listing fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Installer budget in milliseconds
    pub install_timeout_ms: u64,
    /// Default cap for `list-remote`
    pub list_limit: i64,
}

impl Default for GvsConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            install_timeout_ms: INSTALL_TIMEOUT_MS,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl GvsConfig {
    /// Loads the config file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn install_timeout(&self) -> Duration {
        Duration::from_millis(self.install_timeout_ms)
    }
}

/// Filesystem locations every component works against.
///
/// Built once from the user's home directory and handed to each component,
/// so tests can root the whole layout in a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Parent of every installed release (`~/sdk`)
    pub versions_root: PathBuf,
    /// Directory that must be on `PATH` (`~/.gvs/bin`)
    pub bin_dir: PathBuf,
    /// The active-version link (`~/.gvs/bin/go`)
    pub link_path: PathBuf,
    /// Where `go install` drops the per-version downloaders (`~/go/bin`)
    pub downloader_dir: PathBuf,
    /// gvs' own state directory (`~/.gvs`)
    pub data_dir: PathBuf,
}

impl Layout {
    pub fn from_home(home: &Path) -> Self {
        let data_dir = home.join(GVS_DIR);
        let bin_dir = data_dir.join("bin");

        Self {
            versions_root: home.join("sdk"),
            link_path: bin_dir.join(ENTRY_POINT),
            bin_dir,
            downloader_dir: home.join("go").join("bin"),
            data_dir,
        }
    }

    /// Layout for the current user.
    pub fn detect() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(Self::from_home(&home))
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}
