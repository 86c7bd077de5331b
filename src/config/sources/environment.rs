//! Environment variable source: UNIFIEDDB_INDEX_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "UNIFIEDDB_INDEX";

/// Environment source reading the process environment.
/// Uses UNIFIEDDB_INDEX__ prefix and __ as separator for nested keys;
/// `indexer.extensions` is parsed as a comma separated list.
pub fn source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("indexer.extensions")
}

/// Add environment variable overlay to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(source()))
}
