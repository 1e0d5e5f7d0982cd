//! Shared test utilities

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use gvs::config::{COMPLETION_MARKER, Layout};
use gvs::version::error::InstallError;
use gvs::version::installer::Installer;
use gvs::version::name::VersionName;

/// Installer that unpacks a fake release instead of running `go`
pub struct FakeInstaller {
    layout: Layout,
    calls: Mutex<Vec<String>>,
}

impl FakeInstaller {
    pub fn new(layout: &Layout) -> Self {
        Self {
            layout: layout.clone(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Installer for FakeInstaller {
    async fn fetch_downloader(&self, version: &VersionName) -> Result<(), InstallError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("fetch {}", version));
        Ok(())
    }

    async fn run_download(&self, version: &VersionName) -> Result<(), InstallError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("download {}", version));
        write_release(&self.layout.versions_root.join(version.as_str()));
        Ok(())
    }
}

/// Creates a release directory with an entry point and completion marker
pub fn write_release(dir: &Path) {
    fs::create_dir_all(dir.join("bin")).unwrap();
    fs::write(dir.join("bin").join("go"), "#!/bin/sh\n").unwrap();
    fs::write(dir.join(COMPLETION_MARKER), "").unwrap();
}

/// Layout rooted in a fresh temporary home directory
pub fn temp_layout() -> (TempDir, Layout) {
    let temp_dir = TempDir::new().unwrap();
    let layout = Layout::from_home(temp_dir.path());
    (temp_dir, layout)
}
