//! Installed releases, read straight from the versions root
//!
//! A release is installed iff `<versions_root>/<canonical-name>` is a
//! directory. There is no manifest and nothing is cached between calls.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{COMPLETION_MARKER, ENTRY_POINT, VERSION_PREFIX};
use crate::version::error::RegistryError;
use crate::version::name::VersionName;

#[derive(Debug, Clone)]
pub struct LocalRegistry {
    root: PathBuf,
}

impl LocalRegistry {
    pub fn new(versions_root: impl Into<PathBuf>) -> Self {
        Self {
            root: versions_root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a release lives in, whether or not it exists
    pub fn release_dir(&self, version: &VersionName) -> PathBuf {
        self.root.join(version.as_str())
    }

    /// The `bin/go` executable inside a release
    pub fn entry_point(&self, version: &VersionName) -> PathBuf {
        self.release_dir(version).join("bin").join(ENTRY_POINT)
    }

    /// Lists installed releases in directory enumeration order (unsorted).
    ///
    /// A missing versions root means nothing is installed and is not an error.
    /// Plain files and entries without the `go` prefix are skipped.
    pub fn list_installed(&self) -> Result<Vec<VersionName>, RegistryError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Versions root {:?} does not exist", self.root);
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(RegistryError::ReadDir {
                    path: self.root.clone(),
                    source,
                });
            }
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RegistryError::ReadDir {
                path: self.root.clone(),
                source,
            })?;

            if !entry.path().is_dir() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) if name.starts_with(VERSION_PREFIX) => {
                    versions.push(VersionName::new(&name));
                }
                Ok(name) => debug!("Skipping non-release directory {:?}", name),
                Err(name) => debug!("Skipping non UTF-8 directory {:?}", name),
            }
        }

        Ok(versions)
    }

    /// Returns whether the release directory exists.
    ///
    /// "Not found" is a plain `false`; any other I/O error is reported.
    pub fn is_installed(&self, version: &VersionName) -> Result<bool, RegistryError> {
        match std::fs::metadata(self.release_dir(version)) {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(RegistryError::Stat {
                version: version.clone(),
                source,
            }),
        }
    }

    /// Returns whether the downloader finished unpacking the release.
    pub fn is_complete(&self, version: &VersionName) -> bool {
        self.release_dir(version).join(COMPLETION_MARKER).is_file()
    }
}
