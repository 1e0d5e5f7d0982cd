//! Installer implementations

pub mod go_dl;

pub use go_dl::GoDlInstaller;
