//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SMOOTHTABLE_CONFIG";

/// Environment variable overriding the item count.
pub const COUNT_ENV: &str = "SMOOTHTABLE_COUNT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to
/// `~/.config/smoothtable/config.toml`:
///
/// ```toml
/// rows = 4
/// columns = 5
/// count = 1000
/// scroll_step = 2
/// log_file_path = "/tmp/smoothtable.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Rows visible at a time.
    #[serde(default)]
    pub rows: Option<usize>,

    /// Cells per row.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Number of items in the demo dataset.
    #[serde(default)]
    pub count: Option<usize>,

    /// Terminal lines scrolled per arrow key.
    #[serde(default)]
    pub scroll_step: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Rows visible at a time.
    pub rows: usize,
    /// Cells per row.
    pub columns: usize,
    /// Number of items.
    pub count: usize,
    /// Terminal lines scrolled per arrow key.
    pub scroll_step: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            count: 100,
            scroll_step: 1,
            log_file_path: default_log_path(),
        }
    }
}

/// Default log file: `<state dir>/smoothtable/smoothtable.log`, or
/// `smoothtable.log` in the current directory when the platform has no
/// state directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("smoothtable").join("smoothtable.log"),
        None => PathBuf::from("smoothtable.log"),
    }
}

/// Default config file: `<config dir>/smoothtable/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("smoothtable").join("config.toml"))
}

/// Load a config file.
///
/// A missing file is `Ok(None)`.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| ConfigError::ParseError {
            path,
            reason: e.to_string(),
        })
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` (CLI `--config`)
/// 2. `SMOOTHTABLE_CONFIG` environment variable
/// 3. [`default_config_path`]
///
/// # Errors
/// Returns error only if the chosen file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge a config file over the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        rows: config.rows.unwrap_or(defaults.rows),
        columns: config.columns.unwrap_or(defaults.columns),
        count: config.count.unwrap_or(defaults.count),
        scroll_step: config.scroll_step.unwrap_or(defaults.scroll_step),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides.
///
/// `SMOOTHTABLE_COUNT` replaces the item count. A value that is not a
/// number is logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(COUNT_ENV) {
        match raw.trim().parse() {
            Ok(count) => config.count = count,
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid SMOOTHTABLE_COUNT"),
        }
    }

    config
}

/// Apply CLI overrides. Only flags the user set are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    rows: Option<usize>,
    columns: Option<usize>,
    count: Option<usize>,
) -> ResolvedConfig {
    if let Some(rows) = rows {
        config.rows = rows;
    }
    if let Some(columns) = columns {
        config.columns = columns;
    }
    if let Some(count) = count {
        config.count = count;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
