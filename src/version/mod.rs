//! Version lifecycle layer
//!
//! This module catalogs remote releases, enumerates installed ones, switches
//! the active release and removes releases without leaving the active link
//! pointing into a deleted directory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────▶│   Source    │     │  Installer  │
//! │(dedup,limit)│     │ (go.dev/dl) │     │ (golang.org │
//! └─────────────┘     └─────────────┘     │    /dl)     │
//!                                         └─────────────┘
//!                                                ▲
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Remove    │────▶│   Switch    │     │   Install   │
//! │ (workflow)  │     │(active link)│     │ (workflow)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────┐
//! │           Registry (~/sdk/<go-version>)           │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`name`]: Canonical `go`-prefixed release names
//! - [`registry`]: Installed releases read from the versions root
//! - [`source`]: Trait for fetching the remote listing document
//! - [`sources`]: Concrete listing sources (go.dev)
//! - [`catalog`]: Version extraction with dedup and output cap
//! - [`switch`]: The active-version symlink
//! - [`installer`]: Trait for the two external install steps
//! - [`installers`]: Concrete installers (golang.org/dl)
//! - [`install`]: Install workflow with deadline and partial cleanup
//! - [`remove`]: Removal workflow
//! - [`error`]: Error types per component

pub mod catalog;
pub mod error;
pub mod install;
pub mod installer;
pub mod installers;
pub mod name;
pub mod registry;
pub mod remove;
pub mod source;
pub mod sources;
pub mod switch;
