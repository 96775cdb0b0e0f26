//! Error types for apiscan.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ApiScanError>;

/// Errors produced by the detection engine and catalog.
#[derive(Debug, Error)]
pub enum ApiScanError {
    /// A filesystem operation failed on a specific path.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan root is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A catalog lookup by repository name found nothing.
    #[error("repository not in catalog: {0}")]
    RepositoryNotFound(String),

    /// A repository has no detected APIs, so there is nothing to export.
    #[error("repository has no detected APIs: {0}")]
    NoApis(String),

    /// The catalog snapshot could not be read or written.
    #[error("catalog snapshot error: {0}")]
    Snapshot(String),
}

impl ApiScanError {
    /// Wrap an io error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiScanError::Io {
            path: path.into(),
            source,
        }
    }
}
