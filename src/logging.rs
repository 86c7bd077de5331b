//! Logging System
//!
//! Diagnostics go through `tracing`. Standard output carries the index document,
//! so events are only ever written to stderr and/or a log file.
//!
//! Every setting is resolved from four layers, highest first: command-line
//! flags ([`LogOverrides`]), `UNIFIEDDB_INDEX_LOG*` environment variables, the
//! `[logging]` config section, built-in defaults.

use crate::error::IndexError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Full filter directive string; replaces level and module settings.
pub const ENV_FILTER: &str = "UNIFIEDDB_INDEX_LOG";
/// Extra `module=level` directives, comma separated.
pub const ENV_MODULES: &str = "UNIFIEDDB_INDEX_LOG_MODULES";
pub const ENV_FORMAT: &str = "UNIFIEDDB_INDEX_LOG_FORMAT";
pub const ENV_OUTPUT: &str = "UNIFIEDDB_INDEX_LOG_OUTPUT";
pub const ENV_FILE: &str = "UNIFIEDDB_INDEX_LOG_FILE";

const LOG_FILE_NAME: &str = "unifieddb-index.log";

/// `[logging]` section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means the state directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored text on stderr
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `unifieddb_index::tree = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Logging settings given on the command line. `None` defers to the lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOverrides {
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, IndexError> {
        match value {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(IndexError::ConfigError(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

/// Where events are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    File(PathBuf),
    FileAndStderr(PathBuf),
}

impl LogDestination {
    pub fn file(&self) -> Option<&Path> {
        match self {
            LogDestination::Stderr => None,
            LogDestination::File(path) | LogDestination::FileAndStderr(path) => Some(path),
        }
    }
}

/// Fully resolved logging settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directives in `EnvFilter` syntax; `None` when logging is disabled.
    pub filter: Option<String>,
    pub format: LogFormat,
    pub destination: LogDestination,
    pub color: bool,
}

impl LogSettings {
    /// Layer `cli` over the variables visible through `env` over `config`.
    ///
    /// `env` is a lookup such as `|key| std::env::var(key).ok()`; empty values
    /// count as unset.
    pub fn resolve<F>(config: &LoggingConfig, cli: &LogOverrides, env: F) -> Result<Self, IndexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let format = match cli.format.clone().or_else(|| env(ENV_FORMAT)) {
            Some(format) => LogFormat::parse(&format)?,
            None => LogFormat::parse(&config.format)?,
        };

        let output = cli
            .output
            .clone()
            .or_else(|| env(ENV_OUTPUT))
            .unwrap_or_else(|| config.output.clone());
        let destination = match output.as_str() {
            "stderr" => LogDestination::Stderr,
            "file" => LogDestination::File(log_file_path(cli, config, &env)?),
            "file+stderr" => LogDestination::FileAndStderr(log_file_path(cli, config, &env)?),
            "stdout" | "both" => {
                return Err(IndexError::ConfigError(format!(
                    "Invalid log output: {} (stdout is reserved for the index document)",
                    output
                )))
            }
            other => {
                return Err(IndexError::ConfigError(format!(
                    "Invalid log output: {} (must be 'stderr', 'file', or 'file+stderr')",
                    other
                )))
            }
        };

        let filter = if config.enabled {
            let directives = filter_directives(config, cli, &env);
            EnvFilter::try_new(&directives).map_err(|e| {
                IndexError::ConfigError(format!("Invalid log filter {:?}: {}", directives, e))
            })?;
            Some(directives)
        } else {
            None
        };

        Ok(Self {
            filter,
            format,
            color: config.color && destination == LogDestination::Stderr,
            destination,
        })
    }
}

/// `--log-level` rebuilds the filter from that level; otherwise a full
/// `UNIFIEDDB_INDEX_LOG` filter wins over the config level.
fn filter_directives<F>(config: &LoggingConfig, cli: &LogOverrides, env: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let level = match (&cli.level, env(ENV_FILTER)) {
        (Some(level), _) => level.clone(),
        (None, Some(full)) => return full,
        (None, None) => config.level.clone(),
    };
    if level == "off" {
        return level;
    }

    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();
    let mut directives = vec![level];
    directives.extend(
        modules
            .into_iter()
            .map(|(module, level)| format!("{}={}", module, level)),
    );
    if let Some(extra) = env(ENV_MODULES) {
        directives.extend(
            extra
                .split(',')
                .map(str::trim)
                .filter(|spec| spec.contains('='))
                .map(str::to_string),
        );
    }
    directives.join(",")
}

fn log_file_path<F>(cli: &LogOverrides, config: &LoggingConfig, env: &F) -> Result<PathBuf, IndexError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |path: &PathBuf| !path.as_os_str().is_empty();
    if let Some(path) = cli.file.clone().filter(non_empty) {
        return Ok(path);
    }
    if let Some(path) = env(ENV_FILE) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.file.clone().filter(non_empty) {
        return Ok(path);
    }
    default_log_file_path()
}

/// `unifieddb-index.log` in the platform state directory, or the local data
/// directory where there is no state directory.
pub fn default_log_file_path() -> Result<PathBuf, IndexError> {
    let dirs = directories::ProjectDirs::from("", "unifieddb", "unifieddb-index").ok_or_else(|| {
        IndexError::ConfigError("Could not determine platform state directory for log file".to_string())
    })?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Ok(dir.join(LOG_FILE_NAME))
}

/// Install the global subscriber for `config` with `cli` layered on top.
pub fn init_logging(config: &LoggingConfig, cli: &LogOverrides) -> Result<(), IndexError> {
    let settings = LogSettings::resolve(config, cli, |key| std::env::var(key).ok())?;
    install(settings)
}

fn install(settings: LogSettings) -> Result<(), IndexError> {
    let Some(directives) = settings.filter else {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .init();
        return Ok(());
    };
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| IndexError::ConfigError(format!("Invalid log filter {:?}: {}", directives, e)))?;

    let writer = match &settings.destination {
        LogDestination::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogDestination::File(path) => BoxMakeWriter::new(open_log_file(path)?),
        LogDestination::FileAndStderr(path) => {
            BoxMakeWriter::new(open_log_file(path)?.and(std::io::stderr))
        }
    };

    let subscriber = Registry::default().with(filter);
    match settings.format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .init(),
        LogFormat::Text => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(settings.color)
                    .with_writer(writer),
            )
            .init(),
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<Mutex<std::fs::File>, IndexError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            IndexError::ConfigError(format!("Failed to create log directory {:?}: {}", parent, e))
        })?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| IndexError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))?;
    Ok(Mutex::new(file))
}
