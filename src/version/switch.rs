//! The active-version link
//!
//! `~/.gvs/bin/go` is a symlink to `<release>/bin/go`. Switching builds the
//! new link under a temporary name next to it and renames it into place, so
//! the `go` command never disappears mid-switch.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{ENTRY_POINT, Layout};
use crate::version::error::SwitchError;
use crate::version::name::VersionName;
use crate::version::registry::LocalRegistry;

/// Outcome of a successful switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub version: VersionName,
    /// Path the link now points at
    pub target: PathBuf,
    /// Directory the user must have on `PATH`
    pub bin_dir: PathBuf,
}

impl Activation {
    /// Shell snippet the user should add to their shell config
    pub fn path_hint(&self) -> String {
        format!("export PATH={}:$PATH", self.bin_dir.display())
    }
}

#[derive(Debug, Clone)]
pub struct ActiveSwitch {
    registry: LocalRegistry,
    bin_dir: PathBuf,
    link_path: PathBuf,
}

impl ActiveSwitch {
    pub fn new(registry: LocalRegistry, layout: &Layout) -> Self {
        Self {
            registry,
            bin_dir: layout.bin_dir.clone(),
            link_path: layout.link_path.clone(),
        }
    }

    pub fn link_path(&self) -> &Path {
        &self.link_path
    }

    /// Points the active link at `version`'s entry point.
    ///
    /// Fails without touching the filesystem if the release is not installed.
    /// The entry point itself is not checked, so a partial release yields a
    /// dangling link rather than an error.
    pub fn activate(&self, version: &VersionName) -> Result<Activation, SwitchError> {
        if !self.registry.is_installed(version)? {
            return Err(SwitchError::VersionNotFound(version.clone()));
        }

        std::fs::create_dir_all(&self.bin_dir).map_err(|source| SwitchError::Filesystem {
            action: "create bin directory",
            path: self.bin_dir.clone(),
            source,
        })?;

        let target = self.registry.entry_point(version);
        let temp_link = self.temp_link_path();

        if temp_link.symlink_metadata().is_ok() {
            debug!("Removing stale temporary link {:?}", temp_link);
            remove_link(&temp_link)?;
        }

        create_link(&target, &temp_link)?;

        if let Err(source) = std::fs::rename(&temp_link, &self.link_path) {
            let _ = std::fs::remove_file(&temp_link)
                .inspect_err(|e| warn!("Failed to clean up {:?}: {}", temp_link, e));
            return Err(SwitchError::Filesystem {
                action: "replace link",
                path: self.link_path.clone(),
                source,
            });
        }

        info!("Linked {:?} -> {:?}", self.link_path, target);

        Ok(Activation {
            version: version.clone(),
            target,
            bin_dir: self.bin_dir.clone(),
        })
    }

    /// Raw target of the active link, or `None` when there is no link.
    ///
    /// The target is returned even if it no longer exists.
    pub fn current_target(&self) -> Result<Option<PathBuf>, SwitchError> {
        match self.link_path.symlink_metadata() {
            Ok(metadata) if metadata.file_type().is_symlink() => std::fs::read_link(&self.link_path)
                .map(Some)
                .map_err(|source| SwitchError::Filesystem {
                    action: "read link",
                    path: self.link_path.clone(),
                    source,
                }),
            Ok(_) => {
                warn!("{:?} exists but is not a symlink", self.link_path);
                Ok(None)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SwitchError::Filesystem {
                action: "inspect link",
                path: self.link_path.clone(),
                source,
            }),
        }
    }

    /// Whether the active link points at `version`'s entry point
    pub fn is_active(&self, version: &VersionName) -> Result<bool, SwitchError> {
        let entry_point = self.registry.entry_point(version);
        Ok(self.current_target()?.as_deref() == Some(entry_point.as_path()))
    }

    /// Deletes the active link if it targets `entry_point`.
    ///
    /// Returns whether the link was removed. Works on dangling links.
    pub fn retract_if_targets(&self, entry_point: &Path) -> Result<bool, SwitchError> {
        if self.current_target()?.as_deref() != Some(entry_point) {
            return Ok(false);
        }

        remove_link(&self.link_path)?;
        info!("Removed active link {:?}", self.link_path);
        Ok(true)
    }

    fn temp_link_path(&self) -> PathBuf {
        self.bin_dir
            .join(format!(".{}.tmp-{}", ENTRY_POINT, std::process::id()))
    }
}

fn remove_link(path: &Path) -> Result<(), SwitchError> {
    std::fs::remove_file(path).map_err(|source| SwitchError::Filesystem {
        action: "remove link",
        path: path.to_path_buf(),
        source,
    })
}

fn create_link(target: &Path, link: &Path) -> Result<(), SwitchError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let result = std::os::windows::fs::symlink_file(target, link);

    result.map_err(|source| SwitchError::Filesystem {
        action: "create link",
        path: link.to_path_buf(),
        source,
    })
}
