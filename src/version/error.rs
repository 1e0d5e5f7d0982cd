use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

use crate::version::name::VersionName;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read versions directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to check if {version} is installed: {source}")]
    Stat {
        version: VersionName,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("Version not found: {0}")]
    VersionNotFound(VersionName),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to {action} {path:?}: {source}")]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RemoveError {
    #[error("Version not found: {0}")]
    VersionNotFound(VersionName),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to remove release directory {path:?}: {source}")]
    RemoveDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Switch(#[from] SwitchError),
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to launch {step}: {source}")]
    ExternalTool {
        step: &'static str,
        source: std::io::Error,
    },

    #[error("{step} exited with {status}")]
    ExitStatus {
        step: &'static str,
        status: ExitStatus,
    },

    #[error("Install timed out after {after:?}")]
    Timeout { after: Duration },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
