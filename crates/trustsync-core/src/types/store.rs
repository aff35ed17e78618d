//! Browser profiles and classified NSS databases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which trust store a database belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// A Firefox profile directory
    Firefox,
    /// A Chromium-family browser instance
    Chromium,
    /// The per-user shared database at `~/.pki/nssdb`
    Shared,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Firefox => write!(f, "firefox"),
            Self::Chromium => write!(f, "chromium"),
            Self::Shared => write!(f, "shared"),
        }
    }
}

/// A directory believed to hold one browser instance's NSS database.
///
/// Discovered fresh on every reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Absolute path of the candidate database directory
    pub path: PathBuf,
    /// Owning browser family
    pub kind: StoreKind,
}

impl Profile {
    /// Create a profile for the given directory.
    pub fn new(path: impl Into<PathBuf>, kind: StoreKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// On-disk NSS database format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbFormat {
    /// Modern SQLite format (`cert9.db`)
    Sql,
    /// Legacy Berkeley DB format (`cert8.db`)
    Dbm,
}

impl DbFormat {
    /// Prefix `certutil -d` expects in front of the directory.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Sql => "sql:",
            Self::Dbm => "dbm:",
        }
    }

    /// Marker file whose presence identifies the format.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Sql => "cert9.db",
            Self::Dbm => "cert8.db",
        }
    }
}

/// A directory classified as a usable NSS database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NssDatabase {
    /// Absolute directory path
    pub path: PathBuf,
    /// Detected format
    pub format: DbFormat,
    /// Trust store the directory was discovered under
    pub kind: StoreKind,
}

impl NssDatabase {
    /// Create a classified database entry.
    pub fn new(path: impl Into<PathBuf>, format: DbFormat, kind: StoreKind) -> Self {
        Self {
            path: path.into(),
            format,
            kind,
        }
    }

    /// Directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The prefixed reference passed to `certutil -d`, e.g. `sql:/home/u/.pki/nssdb`.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{}{}", self.format.prefix(), self.path.display())
    }
}

impl fmt::Display for NssDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.reference(), self.kind)
    }
}
