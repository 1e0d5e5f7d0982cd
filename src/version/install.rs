//! Install workflow
//!
//! Runs both installer steps under one deadline. Concurrent installs of the
//! same version race on the release directory; there is no locking.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::version::error::InstallError;
use crate::version::installer::Installer;
use crate::version::name::VersionName;
use crate::version::registry::LocalRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Both installer steps ran successfully
    Installed,
    /// A complete release was already present; nothing was run
    AlreadyInstalled,
}

pub struct InstallWorkflow {
    registry: LocalRegistry,
    installer: Arc<dyn Installer>,
    timeout: Duration,
}

impl InstallWorkflow {
    pub fn new(registry: LocalRegistry, installer: Arc<dyn Installer>, timeout: Duration) -> Self {
        Self {
            registry,
            installer,
            timeout,
        }
    }

    /// Installs `version`, aborting on the first failed step.
    ///
    /// If the release directory did not exist beforehand and the downloader
    /// never marked it complete, a failed install deletes it again.
    pub async fn install(&self, version: &VersionName) -> Result<InstallOutcome, InstallError> {
        let existed_before = self.registry.is_installed(version)?;

        if existed_before && self.registry.is_complete(version) {
            info!("{} is already installed", version);
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let steps = async {
            self.installer.fetch_downloader(version).await?;
            self.installer.run_download(version).await
        };

        let result = match tokio::time::timeout(self.timeout, steps).await {
            Ok(result) => result,
            Err(_) => Err(InstallError::Timeout {
                after: self.timeout,
            }),
        };

        if let Err(e) = result {
            if !existed_before {
                self.discard_partial(version);
            }
            return Err(e);
        }

        info!("Installed {}", version);
        Ok(InstallOutcome::Installed)
    }

    fn discard_partial(&self, version: &VersionName) {
        let dir = self.registry.release_dir(version);
        if !dir.is_dir() || self.registry.is_complete(version) {
            return;
        }

        warn!("Removing partial install at {:?}", dir);
        let _ = std::fs::remove_dir_all(&dir)
            .inspect_err(|e| warn!("Failed to remove partial install {:?}: {}", dir, e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COMPLETION_MARKER;
    use crate::version::installer::MockInstaller;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn failing_exit() -> InstallError {
        InstallError::ExternalTool {
            step: "downloader",
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
    }

    fn setup() -> (TempDir, LocalRegistry) {
        let temp_dir = TempDir::new().unwrap();
        let registry = LocalRegistry::new(temp_dir.path().join("sdk"));
        (temp_dir, registry)
    }

    fn populate(dir: PathBuf, complete: bool) {
        fs::create_dir_all(dir.join("bin")).unwrap();
        if complete {
            fs::write(dir.join(COMPLETION_MARKER), "").unwrap();
        }
    }

    #[tokio::test]
    async fn install_runs_both_steps_in_order() {
        let (_temp_dir, registry) = setup();
        let release_dir = registry.release_dir(&VersionName::new("1.22.1"));

        let mut installer = MockInstaller::new();
        let mut seq = mockall::Sequence::new();
        installer
            .expect_fetch_downloader()
            .withf(|v| v.as_str() == "go1.22.1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        installer
            .expect_run_download()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| {
                populate(release_dir.clone(), true);
                Ok(())
            });

        let workflow =
            InstallWorkflow::new(registry.clone(), Arc::new(installer), Duration::from_secs(5));
        let outcome = workflow.install(&VersionName::new("1.22.1")).await.unwrap();

        assert_eq!(outcome, InstallOutcome::Installed);
        assert!(registry.is_installed(&VersionName::new("go1.22.1")).unwrap());
    }

    #[tokio::test]
    async fn install_skips_complete_release() {
        let (_temp_dir, registry) = setup();
        let version = VersionName::new("1.22.1");
        populate(registry.release_dir(&version), true);

        let mut installer = MockInstaller::new();
        installer.expect_fetch_downloader().never();
        installer.expect_run_download().never();

        let workflow = InstallWorkflow::new(registry, Arc::new(installer), Duration::from_secs(5));

        assert_eq!(
            workflow.install(&version).await.unwrap(),
            InstallOutcome::AlreadyInstalled
        );
    }

    #[tokio::test]
    async fn install_aborts_when_downloader_fetch_fails() {
        let (_temp_dir, registry) = setup();

        let mut installer = MockInstaller::new();
        installer
            .expect_fetch_downloader()
            .times(1)
            .returning(|_| Err(failing_exit()));
        installer.expect_run_download().never();

        let workflow = InstallWorkflow::new(registry, Arc::new(installer), Duration::from_secs(5));
        let result = workflow.install(&VersionName::new("1.22.1")).await;

        assert!(matches!(result, Err(InstallError::ExternalTool { .. })));
    }

    #[tokio::test]
    async fn failed_fresh_install_removes_partial_directory() {
        let (_temp_dir, registry) = setup();
        let version = VersionName::new("1.22.1");
        let release_dir = registry.release_dir(&version);

        let mut installer = MockInstaller::new();
        installer.expect_fetch_downloader().returning(|_| Ok(()));
        installer.expect_run_download().returning(move |_| {
            populate(release_dir.clone(), false);
            Err(failing_exit())
        });

        let workflow =
            InstallWorkflow::new(registry.clone(), Arc::new(installer), Duration::from_secs(5));
        let result = workflow.install(&version).await;

        assert!(result.is_err());
        assert!(!registry.is_installed(&version).unwrap());
    }

    #[tokio::test]
    async fn failed_install_keeps_preexisting_directory() {
        let (_temp_dir, registry) = setup();
        let version = VersionName::new("1.22.1");
        populate(registry.release_dir(&version), false);

        let mut installer = MockInstaller::new();
        installer
            .expect_fetch_downloader()
            .returning(|_| Err(failing_exit()));

        let workflow =
            InstallWorkflow::new(registry.clone(), Arc::new(installer), Duration::from_secs(5));
        let result = workflow.install(&version).await;

        assert!(result.is_err());
        assert!(registry.is_installed(&version).unwrap());
    }

    struct StalledInstaller;

    #[async_trait::async_trait]
    impl Installer for StalledInstaller {
        async fn fetch_downloader(&self, _version: &VersionName) -> Result<(), InstallError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }

        async fn run_download(&self, _version: &VersionName) -> Result<(), InstallError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn install_times_out() {
        let (_temp_dir, registry) = setup();

        let workflow = InstallWorkflow::new(
            registry,
            Arc::new(StalledInstaller),
            Duration::from_millis(50),
        );
        let result = workflow.install(&VersionName::new("1.22.1")).await;

        assert!(matches!(
            result,
            Err(InstallError::Timeout { after }) if after == Duration::from_millis(50)
        ));
    }
}
