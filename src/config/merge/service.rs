//! MergeService: orchestrates sources, validates, deserializes to UnifiedIndexConfig.

use crate::config::sources::{environment, global_file};
use crate::config::UnifiedIndexConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: serde defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<UnifiedIndexConfig, ConfigError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;
        Self::finish(builder)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<UnifiedIndexConfig, ConfigError> {
        let builder = Config::builder().add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder)?;
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<UnifiedIndexConfig, ConfigError> {
        let config: UnifiedIndexConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(ConfigError::Message)?;
        Ok(config)
    }
}
