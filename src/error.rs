//! Error types for the indexer and its command-line surface.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while indexing a tree or writing the resulting document.
///
/// Filesystem variants carry the path that failed; none of them are retried.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to resolve root {path:?}: {source}")]
    ResolveRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to inspect {path:?}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Entry name is not valid UTF-8: {path:?}")]
    InvalidName { path: PathBuf },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for IndexError {
    fn from(err: config::ConfigError) -> Self {
        IndexError::ConfigError(err.to_string())
    }
}

impl IndexError {
    /// Path of the filesystem entry that caused the failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            IndexError::ResolveRoot { path, .. }
            | IndexError::ReadDir { path, .. }
            | IndexError::Metadata { path, .. }
            | IndexError::InvalidName { path } => Some(path),
            _ => None,
        }
    }
}
