//! Error types for list file operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or mutating list files.
#[derive(Debug, Error)]
pub enum TrackError {
    /// List file or directory could not be read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path to be tracked does not exist.
    #[error("Path does not exist: {path}")]
    MissingPath { path: PathBuf },
}

impl TrackError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
