//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::UnifiedIndexConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
///
/// Precedence (lowest to highest): built-in defaults, the global config file
/// (or the file passed explicitly), then `UNIFIEDDB_INDEX__*` environment variables.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<UnifiedIndexConfig, ConfigError> {
        MergeService::load()
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<UnifiedIndexConfig, ConfigError> {
        MergeService::load_from_file(path)
    }
}
