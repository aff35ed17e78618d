//! Host platform identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family the process is running on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux desktop
    Linux,
    /// macOS
    #[serde(rename = "macos")]
    MacOs,
    /// Windows (never reconciled)
    Windows,
    /// Anything else, carrying the raw `std::env::consts::OS` value
    Other(String),
}

impl Platform {
    /// Detect the platform this binary was built for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier as reported by `std::env::consts::OS`.
    #[must_use]
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    /// Only Linux and macOS have browser NSS databases we reconcile.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Linux | Self::MacOs)
    }

    /// Install hint for the package that ships `certutil`.
    #[must_use]
    pub const fn certutil_hint(&self) -> &'static str {
        match self {
            Self::MacOs => "brew install nss",
            Self::Linux => {
                "apt install libnss3-tools (Debian/Ubuntu) or dnf install nss-tools (Fedora/RHEL)"
            }
            Self::Windows | Self::Other(_) => "install the NSS tools for your platform",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::Other(os) => write!(f, "{os}"),
        }
    }
}
