//! Removal workflow

use tracing::info;

use crate::version::error::RemoveError;
use crate::version::name::VersionName;
use crate::version::registry::LocalRegistry;
use crate::version::switch::ActiveSwitch;

/// Outcome of a successful removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// Whether the active link pointed at the removed release and was deleted
    pub deactivated: bool,
}

pub struct RemovalWorkflow {
    registry: LocalRegistry,
    switch: ActiveSwitch,
}

impl RemovalWorkflow {
    pub fn new(registry: LocalRegistry, switch: ActiveSwitch) -> Self {
        Self { registry, switch }
    }

    /// Deletes the release directory, then the active link if it targeted it.
    ///
    /// When the directory cannot be fully deleted the link is left alone and
    /// the caller has to run the removal again.
    pub fn remove(&self, version: &VersionName) -> Result<Removal, RemoveError> {
        if !self.registry.is_installed(version)? {
            return Err(RemoveError::VersionNotFound(version.clone()));
        }

        let release_dir = self.registry.release_dir(version);
        std::fs::remove_dir_all(&release_dir).map_err(|source| RemoveError::RemoveDir {
            path: release_dir.clone(),
            source,
        })?;
        info!("Removed {:?}", release_dir);

        let deactivated = self
            .switch
            .retract_if_targets(&self.registry.entry_point(version))?;

        Ok(Removal { deactivated })
    }
}
