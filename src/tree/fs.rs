//! Filesystem access used by the indexer
//!
//! The indexer needs two read-only capabilities: listing the names in a
//! directory and a status check on a single path. Both sit behind [`IndexFs`]
//! so traversal can run against the real filesystem or an in-memory fake.

use crate::error::IndexError;
use crate::tree::classify::EntryKind;
use async_trait::async_trait;
use std::path::Path;

/// Directory listing and status checks consumed by the indexer.
#[async_trait]
pub trait IndexFs: Send + Sync {
    /// Names of the immediate entries of `path`, in listing order.
    async fn list_dir(&self, path: &Path) -> Result<Vec<String>, IndexError>;

    /// Classify the entry at `path`.
    async fn entry_kind(&self, path: &Path) -> Result<EntryKind, IndexError>;
}

/// Non-blocking filesystem access through `tokio::fs`.
#[derive(Debug, Clone, Copy)]
pub struct TokioFs {
    follow_symlinks: bool,
}

impl TokioFs {
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

impl Default for TokioFs {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl IndexFs for TokioFs {
    async fn list_dir(&self, path: &Path) -> Result<Vec<String>, IndexError> {
        let read_dir_err = |source: std::io::Error| IndexError::ReadDir {
            path: path.to_path_buf(),
            source,
        };

        let mut dir = tokio::fs::read_dir(path).await.map_err(read_dir_err)?;
        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(read_dir_err)? {
            let name = entry
                .file_name()
                .into_string()
                .map_err(|_| IndexError::InvalidName { path: entry.path() })?;
            names.push(name);
        }
        Ok(names)
    }

    async fn entry_kind(&self, path: &Path) -> Result<EntryKind, IndexError> {
        let metadata = if self.follow_symlinks {
            tokio::fs::metadata(path).await
        } else {
            tokio::fs::symlink_metadata(path).await
        }
        .map_err(|source| IndexError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(EntryKind::from_metadata(&metadata))
    }
}
