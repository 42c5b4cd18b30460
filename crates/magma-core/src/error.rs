//! Error types for hashing and snapshot operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that abort a tree build or snapshot.
///
/// Every variant is fatal for the snapshot in progress: no partial tree is
/// ever returned or written.
#[derive(Debug, Error)]
pub enum HashError {
    /// Path could not be stat'ed (missing or inaccessible).
    #[error("Path not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Open, read, list or write failure.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot could not be serialized.
    #[error("Failed to encode snapshot: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

impl HashError {
    /// Create a not-found error for a failed lstat.
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::NotFound {
            path: path.into(),
            source,
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path the error is attached to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path, .. } | Self::Io { path, .. } => Some(path),
            Self::Encode { .. } => None,
        }
    }
}

impl From<serde_json::Error> for HashError {
    fn from(source: serde_json::Error) -> Self {
        Self::Encode { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_path() {
        let err = HashError::not_found(
            "/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HashError::NotFound { .. }));
        assert_eq!(err.path(), Some(Path::new("/missing")));
        assert!(err.to_string().contains("/missing"));
    }

    #[test]
    fn test_io_is_not_reclassified() {
        let err = HashError::io(
            "/vanished",
            std::io::Error::new(std::io::ErrorKind::NotFound, "deleted mid-walk"),
        );
        assert!(matches!(err, HashError::Io { .. }));
    }
}
