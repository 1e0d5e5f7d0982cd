//! Canonical release names
//!
//! User input like `1.21.0` and `go1.21.0` both refer to the release whose
//! directory is `sdk/go1.21.0`. No validation happens here: `abc` becomes
//! `goabc` and simply never matches an installed directory.

use std::fmt;

use crate::config::VERSION_PREFIX;

/// A release identifier in canonical (`go`-prefixed) form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionName(String);

impl VersionName {
    /// Normalizes arbitrary input into canonical form. Never fails.
    pub fn new(input: &str) -> Self {
        Self(normalize(input))
    }

    /// Canonical form, e.g. `go1.21.0`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Version without the prefix, e.g. `1.21.0`
    pub fn bare(&self) -> &str {
        self.0.strip_prefix(VERSION_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for VersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionName {
    fn from(input: &str) -> Self {
        Self::new(input)
    }
}

impl AsRef<str> for VersionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prefixes `go` unless the input already starts with it.
pub fn normalize(input: &str) -> String {
    if input.starts_with(VERSION_PREFIX) {
        input.to_string()
    } else {
        format!("{VERSION_PREFIX}{input}")
    }
}
