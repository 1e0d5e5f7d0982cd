//! Command-line surface
//!
//! Parses one command per run, builds the components from an explicit
//! [`Layout`] and prints results. All formatting of user-facing output
//! happens here; the `version` layer only returns values and errors.

pub mod completion;

use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::{GvsConfig, Layout};
use crate::version::catalog::RemoteCatalog;
use crate::version::install::{InstallOutcome, InstallWorkflow};
use crate::version::installers::GoDlInstaller;
use crate::version::name::VersionName;
use crate::version::registry::LocalRegistry;
use crate::version::remove::RemovalWorkflow;
use crate::version::sources::GoDevSource;
use crate::version::switch::ActiveSwitch;

#[derive(Debug, Parser)]
#[command(name = "gvs")]
#[command(version, about = "A simple Go version manager")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available Go versions
    ListRemote {
        /// Maximum number of versions to print (<= 0 prints all)
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// List installed Go versions
    List,
    /// Install a Go version
    Install {
        /// Version to install (e.g. "1.22.1" or "go1.22.1")
        version: String,
    },
    /// Switch to an installed Go version
    Use {
        /// Version to activate
        version: String,
    },
    /// Uninstall a Go version
    Remove {
        /// Version to remove
        version: String,
    },
    /// Generate shell completion script
    Completion {
        #[command(subcommand)]
        shell: completion::CompletionCommand,
    },
}

/// Rewrites Go-style `-limit` flags to `--limit` so both spellings work.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-limit") => OsString::from("--limit"),
            Some(s) if s.starts_with("-limit=") => OsString::from(format!("-{s}")),
            _ => arg,
        })
        .collect()
}

/// Everything a command needs, built once per run
pub struct App {
    pub layout: Layout,
    pub config: GvsConfig,
}

impl App {
    pub fn new(layout: Layout, config: GvsConfig) -> Self {
        Self { layout, config }
    }

    /// Layout for the current user plus the optional config file
    pub fn load() -> Result<Self> {
        let layout = Layout::detect()?;
        let config = GvsConfig::load(&layout.config_path())?;
        debug!("Using layout {:?}", layout);
        Ok(Self::new(layout, config))
    }

    pub fn registry(&self) -> LocalRegistry {
        LocalRegistry::new(&self.layout.versions_root)
    }

    pub fn switch(&self) -> ActiveSwitch {
        ActiveSwitch::new(self.registry(), &self.layout)
    }
}

pub async fn run(app: &App, command: Command) -> Result<()> {
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::ListRemote { limit } => {
            let limit = limit.unwrap_or(app.config.list_limit);
            list_remote(app, limit, &mut stdout).await
        }
        Command::List => list_local(app, &mut stdout),
        Command::Install { version } => {
            install(app, &VersionName::new(&version), &mut stdout).await
        }
        Command::Use { version } => use_version(app, &VersionName::new(&version), &mut stdout),
        Command::Remove { version } => remove(app, &VersionName::new(&version), &mut stdout),
        Command::Completion { shell } => completion::run(app, shell, &mut stdout),
    }
}

pub async fn list_remote(app: &App, limit: i64, out: &mut impl Write) -> Result<()> {
    let source = GoDevSource::new(&app.config.listing_url, app.config.fetch_timeout())
        .context("failed to create HTTP client")?;
    let catalog = RemoteCatalog::new(Arc::new(source));

    let versions = catalog
        .fetch_top(limit)
        .await
        .context("failed to get Go versions")?;

    for version in versions {
        writeln!(out, "{}", version.bare())?;
    }

    Ok(())
}

pub fn list_local(app: &App, out: &mut impl Write) -> Result<()> {
    let registry = app.registry();
    let switch = app.switch();

    let versions = registry
        .list_installed()
        .context("failed to list installed versions")?;

    if versions.is_empty() {
        writeln!(out, "No Go versions installed.")?;
        return Ok(());
    }

    let active = switch
        .current_target()
        .context("failed to read active version")?;

    for version in versions {
        let mut line = version.to_string();
        if active.as_deref() == Some(registry.entry_point(&version).as_path()) {
            line.push_str(" (active)");
        }
        if !registry.is_complete(&version) {
            line.push_str(" (incomplete)");
        }
        writeln!(out, "{line}")?;
    }

    Ok(())
}

pub async fn install(app: &App, version: &VersionName, out: &mut impl Write) -> Result<()> {
    let installer = GoDlInstaller::new(&app.layout.downloader_dir);
    let workflow = InstallWorkflow::new(
        app.registry(),
        Arc::new(installer),
        app.config.install_timeout(),
    );

    writeln!(out, "Installing Go {}...", version.bare())?;
    out.flush()?;

    let outcome = workflow
        .install(version)
        .await
        .with_context(|| format!("failed to install {version}"))?;

    match outcome {
        InstallOutcome::Installed => {
            writeln!(out, "Go {} installed successfully.", version.bare())?
        }
        InstallOutcome::AlreadyInstalled => {
            writeln!(out, "Go {} is already installed.", version.bare())?
        }
    }

    Ok(())
}

pub fn use_version(app: &App, version: &VersionName, out: &mut impl Write) -> Result<()> {
    let activation = app
        .switch()
        .activate(version)
        .with_context(|| format!("failed to switch to {version}"))?;

    writeln!(out, "Now using Go {}", activation.version.bare())?;
    writeln!(out, "Please add the following to your shell's config file:")?;
    writeln!(out, "{}", activation.path_hint())?;

    Ok(())
}

pub fn remove(app: &App, version: &VersionName, out: &mut impl Write) -> Result<()> {
    let workflow = RemovalWorkflow::new(app.registry(), app.switch());

    let removal = workflow
        .remove(version)
        .with_context(|| format!("failed to remove {version}"))?;

    if removal.deactivated {
        writeln!(out, "{version} was the active version; no Go version is active now.")?;
    }
    writeln!(out, "Go version {} removed successfully.", version.bare())?;

    Ok(())
}
