//! Configuration
//!
//! Layered settings for the indexer and its logging, loaded with the `config`
//! crate. See [`ConfigLoader`] for source precedence.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnifiedIndexConfig {
    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl UnifiedIndexConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.indexer.validate()
    }
}

/// Traversal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// File extensions (leading dot included, case-sensitive) that become references
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Classify symlinks by their target instead of skipping them
    #[serde(default = "default_true")]
    pub follow_symlinks: bool,
}

fn default_extensions() -> Vec<String> {
    vec![".yaml".to_string(), ".json".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            follow_symlinks: default_true(),
        }
    }
}

impl IndexerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.extensions.is_empty() {
            return Err("indexer.extensions must list at least one extension".to_string());
        }
        for ext in &self.extensions {
            if ext.len() < 2 || !ext.starts_with('.') || ext[1..].contains('.') {
                return Err(format!(
                    "Invalid extension {:?} (expected a single extension with a leading dot, e.g. \".yaml\")",
                    ext
                ));
            }
        }
        Ok(())
    }
}
