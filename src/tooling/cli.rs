//! CLI Tooling
//!
//! Command-line interface for the indexer. Argument list, working directory and
//! output streams are explicit so the whole entry point runs in-process in tests.

use crate::config::{ConfigLoader, UnifiedIndexConfig};
use crate::error::IndexError;
use crate::logging::LogOverrides;
use crate::tree::{IndexNode, TreeIndexer};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Printed to the error stream when no root folder is given.
pub const USAGE: &str = "usage: ./index-unifieddb.js <path-to-unifieddb-arch-folder>";

/// Index a UnifiedDB architecture folder into a single JSON reference tree
#[derive(Parser, Debug)]
#[command(name = "index-unifieddb")]
#[command(about = "Index a UnifiedDB architecture folder into a single JSON reference tree")]
pub struct Cli {
    /// Root folder to index, resolved against the current directory
    pub root: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging flags given on this command line.
    pub fn log_overrides(&self) -> LogOverrides {
        LogOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

/// Resolved environment for one invocation.
pub struct CliContext {
    cwd: PathBuf,
    config: UnifiedIndexConfig,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from `config_path` when
    /// given and from the standard sources otherwise.
    pub fn new(cwd: PathBuf, config_path: Option<PathBuf>) -> Result<Self, IndexError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::with_config(cwd, config))
    }

    pub fn with_config(cwd: PathBuf, config: UnifiedIndexConfig) -> Self {
        Self { cwd, config }
    }

    pub fn config(&self) -> &UnifiedIndexConfig {
        &self.config
    }

    /// Resolve a root argument against the working directory.
    pub fn resolve_root(&self, root: &Path) -> Result<PathBuf, IndexError> {
        let joined = self.cwd.join(root);
        dunce::canonicalize(&joined).map_err(|source| IndexError::ResolveRoot {
            path: joined,
            source,
        })
    }

    /// Index the tree under `root`.
    pub async fn build_index(&self, root: &Path) -> Result<IndexNode, IndexError> {
        let root = self.resolve_root(root)?;
        info!(root = %root.display(), "Indexing");
        TreeIndexer::new(root)
            .with_indexer_config(self.config.indexer.clone())
            .index_root()
            .await
    }

    /// Execute one invocation.
    ///
    /// Without a root argument the usage line goes to `err` and nothing is written
    /// to `out`. Otherwise the complete tree is written to `out` as pretty-printed
    /// JSON; on failure `out` is left untouched.
    pub async fn execute<W: Write, E: Write>(
        &self,
        cli: &Cli,
        out: &mut W,
        err: &mut E,
    ) -> Result<(), IndexError> {
        let Some(root) = &cli.root else {
            writeln!(err, "{}", USAGE)?;
            return Ok(());
        };

        let tree = self.build_index(root).await?;
        let rendered = serde_json::to_string_pretty(&tree)?;
        writeln!(out, "{}", rendered)?;
        out.flush()?;
        Ok(())
    }
}
