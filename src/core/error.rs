//! Error types for kernel packaging.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while packaging a kernel tree.
///
/// None of these are recovered from; every one aborts the run.
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("download failed: {url}\n  {reason}")]
    Download { url: String, reason: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("archive failed: {0}")]
    Archive(String),

    #[error("repository error: {0}")]
    Repository(String),

    #[error("invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl PackageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, PackageError>;
