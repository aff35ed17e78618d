use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for trust-store operations
pub type Result<T> = std::result::Result<T, TrustError>;

/// Errors that can occur while reconciling NSS trust stores
#[derive(Error, Debug)]
pub enum TrustError {
    /// The certificate-management utility could not be located
    #[error("certutil not found; install it to enable browser trust stores")]
    ToolUnavailable,

    /// No NSS database accepted the certificate
    #[error("no NSS trust stores found")]
    NoTrustStoresFound,

    /// One database's add/verify/delete returned a non-zero status
    #[error("certutil failed on {database} (exit code {code:?}): {stderr}")]
    InvocationFailed {
        /// Prefixed database reference the command targeted
        database: String,
        /// Exit code, `None` if the process was killed by a signal
        code: Option<i32>,
        /// Trimmed standard error
        stderr: String,
    },

    /// The certificate file could not be read or parsed
    #[error("invalid certificate {path}: {reason}")]
    Certificate {
        /// Path of the certificate file
        path: PathBuf,
        /// Parser or decoder message
        reason: String,
    },

    /// Filesystem or process I/O failed
    #[error("io error on {path}: {source}")]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings are invalid or incomplete
    #[error("configuration error: {0}")]
    Config(String),
}

impl TrustError {
    /// Build an [`TrustError::Io`] for the given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_failure_names_database() {
        let err = TrustError::InvocationFailed {
            database: "sql:/tmp/db".into(),
            code: Some(255),
            stderr: "SEC_ERROR_BAD_DATABASE".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sql:/tmp/db"));
        assert!(msg.contains("SEC_ERROR_BAD_DATABASE"));
    }

    #[test]
    fn tool_unavailable_mentions_certutil() {
        assert!(TrustError::ToolUnavailable.to_string().contains("certutil"));
    }

    #[test]
    fn io_constructor_keeps_path() {
        let err = TrustError::io(
            "/nope/cert.pem",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().starts_with("io error on /nope/cert.pem"));
    }
}
