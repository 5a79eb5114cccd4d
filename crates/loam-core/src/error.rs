//! Migration error types
//!
//! Only failures that make the whole run pointless surface as
//! [`MigrationError`]. Per-document and per-stub problems are recorded in the
//! [`RunReport`](crate::context::RunReport) and the run carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Migration errors
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Filesystem operation failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file missing, unreadable or inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Copying the assets tree failed
    #[error("Asset copy failed for {}: {message}", path.display())]
    AssetCopy { path: PathBuf, message: String },
}

/// Specialized Result type for migration operations
pub type MigrationResult<T> = Result<T, MigrationError>;

impl MigrationError {
    /// Wrap an I/O error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_the_path() {
        let err = MigrationError::io(
            "/tmp/out/pages",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/tmp/out/pages"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_config_error_message() {
        let err = MigrationError::config("document_folders must not be empty");
        assert_eq!(
            err.to_string(),
            "Configuration error: document_folders must not be empty"
        );
    }
}
