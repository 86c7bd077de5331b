//! Recursive tree-to-index transformation
//!
//! Each directory is listed once, then every entry is classified concurrently
//! and subdirectories are indexed recursively. The batch for one directory is
//! joined with `try_join_all`, so the first failure anywhere below a directory
//! drops the rest of that batch and fails the whole call.

use crate::config::IndexerConfig;
use crate::error::IndexError;
use crate::tree::classify::{indexable_stem, EntryKind};
use crate::tree::fs::{IndexFs, TokioFs};
use crate::tree::node::{IndexEntry, IndexNode, Reference};
use crate::tree::segments::PathSegments;
use futures::future::{try_join_all, BoxFuture, FutureExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pair produced by one directory entry, plus the entry name it came from.
struct IndexedEntry {
    entry_name: String,
    key: String,
    value: IndexEntry,
}

/// Builds an [`IndexNode`] tree for a root directory.
pub struct TreeIndexer {
    root: PathBuf,
    config: IndexerConfig,
    fs: Arc<dyn IndexFs>,
}

impl TreeIndexer {
    /// Create an indexer for `root` using the real filesystem and default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let config = IndexerConfig::default();
        let fs = Arc::new(TokioFs::new(config.follow_symlinks));
        Self {
            root: root.into(),
            config,
            fs,
        }
    }

    /// Apply indexer settings. Also rebuilds the default filesystem so the
    /// symlink policy takes effect; call [`with_fs`](Self::with_fs) afterwards
    /// to substitute another implementation.
    pub fn with_indexer_config(mut self, config: IndexerConfig) -> Self {
        self.fs = Arc::new(TokioFs::new(config.follow_symlinks));
        self.config = config;
        self
    }

    pub fn with_fs(mut self, fs: Arc<dyn IndexFs>) -> Self {
        self.fs = fs;
        self
    }

    /// Index the whole tree below the root.
    pub async fn index_root(&self) -> Result<IndexNode, IndexError> {
        let started = Instant::now();
        let node = self.index(PathSegments::root()).await?;
        info!(
            root = %self.root.display(),
            references = node.references().len(),
            directories = node.directory_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Indexed tree"
        );
        Ok(node)
    }

    /// Index the directory at `root` joined with `segments`.
    pub fn index(&self, segments: PathSegments) -> BoxFuture<'_, Result<IndexNode, IndexError>> {
        async move {
            let dir = segments.resolve(&self.root);
            let names = self.fs.list_dir(&dir).await?;
            debug!(dir = %dir.display(), entries = names.len(), "Listed directory");

            let pending = names
                .into_iter()
                .map(|name| self.index_entry(&segments, &dir, name));
            let mut indexed: Vec<IndexedEntry> =
                try_join_all(pending).await?.into_iter().flatten().collect();

            indexed.sort_by(|a, b| a.entry_name.cmp(&b.entry_name));
            let mut node = IndexNode::new();
            for entry in indexed {
                if node.insert(entry.key.clone(), entry.value).is_some() {
                    warn!(
                        dir = %dir.display(),
                        key = %entry.key,
                        winner = %entry.entry_name,
                        "Duplicate index key, keeping last entry"
                    );
                }
            }
            Ok(node)
        }
        .boxed()
    }

    async fn index_entry(
        &self,
        segments: &PathSegments,
        dir: &Path,
        name: String,
    ) -> Result<Option<IndexedEntry>, IndexError> {
        let path = dir.join(&name);
        match self.fs.entry_kind(&path).await? {
            EntryKind::File => {
                let Some(stem) = indexable_stem(&name, &self.config.extensions) else {
                    debug!(path = %path.display(), "Skipping non-indexable file");
                    return Ok(None);
                };
                let reference = Reference::new(segments.reference_path(&name));
                Ok(Some(IndexedEntry {
                    key: stem.to_string(),
                    value: IndexEntry::Reference(reference),
                    entry_name: name,
                }))
            }
            EntryKind::Directory => {
                let child = self.index(segments.child(&name)).await?;
                Ok(Some(IndexedEntry {
                    key: name.clone(),
                    value: IndexEntry::Node(child),
                    entry_name: name,
                }))
            }
            EntryKind::Other => {
                debug!(path = %path.display(), "Skipping entry that is neither file nor directory");
                Ok(None)
            }
        }
    }
}

/// Index the directory at `root` joined with `segments` using the real filesystem.
pub async fn index(segments: PathSegments, root: &Path) -> Result<IndexNode, IndexError> {
    TreeIndexer::new(root).index(segments).await
}
