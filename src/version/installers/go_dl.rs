//! golang.org/dl based installer
//!
//! `go install golang.org/dl/go1.22.1@latest` builds a `go1.22.1` wrapper
//! into `~/go/bin`; running `go1.22.1 download` unpacks the release into
//! `~/sdk/go1.22.1`. Both children share this process' stdout/stderr.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::VERSION_PREFIX;
use crate::version::error::InstallError;
use crate::version::installer::Installer;
use crate::version::name::VersionName;

const DL_MODULE: &str = "golang.org/dl";

pub struct GoDlInstaller {
    go_command: PathBuf,
    downloader_dir: PathBuf,
}

impl GoDlInstaller {
    /// Uses `go` from `PATH` and looks for downloaders in `downloader_dir`
    pub fn new(downloader_dir: impl Into<PathBuf>) -> Self {
        Self::with_go_command("go", downloader_dir)
    }

    pub fn with_go_command(
        go_command: impl Into<PathBuf>,
        downloader_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            go_command: go_command.into(),
            downloader_dir: downloader_dir.into(),
        }
    }

    /// Path of the wrapper binary `go install` produces for `version`
    pub fn downloader_path(&self, version: &VersionName) -> PathBuf {
        self.downloader_dir
            .join(format!("{}{}", VERSION_PREFIX, version.bare()))
    }
}

#[async_trait::async_trait]
impl Installer for GoDlInstaller {
    async fn fetch_downloader(&self, version: &VersionName) -> Result<(), InstallError> {
        let package = format!("{}/{}{}@latest", DL_MODULE, VERSION_PREFIX, version.bare());
        info!("Installing downloader {}", package);

        let mut cmd = Command::new(&self.go_command);
        cmd.args(["install", package.as_str()]);
        run_step("go install", cmd).await
    }

    async fn run_download(&self, version: &VersionName) -> Result<(), InstallError> {
        let downloader = self.downloader_path(version);
        info!("Running {:?} download", downloader);

        let mut cmd = Command::new(&downloader);
        cmd.arg("download");
        run_step("downloader", cmd).await
    }
}

/// Runs `cmd` with inherited output; the child is killed if the future is dropped.
async fn run_step(step: &'static str, mut cmd: Command) -> Result<(), InstallError> {
    debug!("Spawning {:?}", cmd.as_std().get_program());

    let status = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|source| InstallError::ExternalTool { step, source })?;

    if !status.success() {
        return Err(InstallError::ExitStatus { step, status });
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_script(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn downloader_path_uses_prefixed_name() {
        let installer = GoDlInstaller::new("/home/user/go/bin");

        assert_eq!(
            installer.downloader_path(&VersionName::new("1.22.1")),
            PathBuf::from("/home/user/go/bin/go1.22.1")
        );
    }

    #[tokio::test]
    async fn fetch_downloader_passes_dl_package_to_go_install() {
        let temp_dir = TempDir::new().unwrap();
        let go = temp_dir.path().join("go");
        let args_file = temp_dir.path().join("args");
        write_script(&go, &format!("echo \"$@\" > {}", args_file.display()));

        let installer = GoDlInstaller::with_go_command(&go, temp_dir.path());
        installer
            .fetch_downloader(&VersionName::new("go1.22.1"))
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(&args_file).unwrap().trim(),
            "install golang.org/dl/go1.22.1@latest"
        );
    }

    #[tokio::test]
    async fn fetch_downloader_reports_non_zero_exit() {
        let temp_dir = TempDir::new().unwrap();
        let go = temp_dir.path().join("go");
        write_script(&go, "exit 3");

        let installer = GoDlInstaller::with_go_command(&go, temp_dir.path());
        let result = installer.fetch_downloader(&VersionName::new("1.22.1")).await;

        assert!(matches!(
            result,
            Err(InstallError::ExitStatus { step: "go install", status }) if status.code() == Some(3)
        ));
    }

    #[tokio::test]
    async fn run_download_reports_missing_downloader() {
        let temp_dir = TempDir::new().unwrap();

        let installer = GoDlInstaller::new(temp_dir.path());
        let result = installer.run_download(&VersionName::new("1.22.1")).await;

        assert!(matches!(
            result,
            Err(InstallError::ExternalTool { step: "downloader", .. })
        ));
    }

    #[tokio::test]
    async fn run_download_invokes_downloader_with_download_action() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join("ran");
        write_script(
            &temp_dir.path().join("go1.22.1"),
            &format!("[ \"$1\" = download ] && touch {}", marker.display()),
        );

        let installer = GoDlInstaller::new(temp_dir.path());
        installer
            .run_download(&VersionName::new("1.22.1"))
            .await
            .unwrap();

        assert!(marker.exists());
    }
}
