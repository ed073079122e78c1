use config::{Config as ConfigBuilder, ConfigError, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::debug;

use crate::errors::SearchResult;

/// The default maximum number of elements one worker scans before the
/// planner considers adding another worker.
pub const DEFAULT_MAX_SEARCH_LENGTH: usize = 100_000;

/// The default maximum number of concurrent workers per search.
pub const DEFAULT_MAX_SEARCH_WORKERS: usize = 4;

/// Tunables for partitioned searches.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.slicescout.yaml` in the current directory
/// 3. Global `$HOME/.config/slicescout/config.yaml`
///
/// # Configuration Format
///
/// ```yaml
/// # Elements per worker before another worker is added
/// max_search_length: 100000
///
/// # Upper bound on concurrent workers
/// max_search_workers: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// A zero or negative tunable is normalized to its default, both here and in
/// the setters.
///
/// # Process-wide defaults
///
/// The free search functions read a process-wide `SearchConfig`. Each call
/// copies it once before planning, so a concurrent [`set_max_search_length`]
/// or [`set_max_search_workers`] only affects searches that start afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Elements per worker partition
    #[serde(
        default = "default_max_search_length",
        deserialize_with = "deserialize_max_search_length"
    )]
    pub max_search_length: usize,

    /// Maximum number of workers for one search
    #[serde(
        default = "default_max_search_workers",
        deserialize_with = "deserialize_max_search_workers"
    )]
    pub max_search_workers: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_search_length() -> usize {
    DEFAULT_MAX_SEARCH_LENGTH
}

fn default_max_search_workers() -> usize {
    DEFAULT_MAX_SEARCH_WORKERS
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn normalize(value: i64, default: usize) -> usize {
    if value > 0 {
        value as usize
    } else {
        default
    }
}

fn deserialize_max_search_length<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize(i64::deserialize(deserializer)?, DEFAULT_MAX_SEARCH_LENGTH))
}

fn deserialize_max_search_workers<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(normalize(i64::deserialize(deserializer)?, DEFAULT_MAX_SEARCH_WORKERS))
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_length: DEFAULT_MAX_SEARCH_LENGTH,
            max_search_workers: DEFAULT_MAX_SEARCH_WORKERS,
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Builder method to set the elements per worker; `0` means the default
    pub fn with_max_search_length(mut self, length: usize) -> Self {
        self.max_search_length = if length > 0 {
            length
        } else {
            DEFAULT_MAX_SEARCH_LENGTH
        };
        self
    }

    /// Builder method to set the worker cap; `0` means the default
    pub fn with_max_search_workers(mut self, workers: usize) -> Self {
        self.max_search_workers = if workers > 0 {
            workers
        } else {
            DEFAULT_MAX_SEARCH_WORKERS
        };
        self
    }

    /// Builder method to set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Elements per worker and worker cap, with zeroes replaced by defaults
    pub(crate) fn tunables(&self) -> (usize, usize) {
        let length = if self.max_search_length > 0 {
            self.max_search_length
        } else {
            DEFAULT_MAX_SEARCH_LENGTH
        };
        let workers = if self.max_search_workers > 0 {
            self.max_search_workers
        } else {
            DEFAULT_MAX_SEARCH_WORKERS
        };
        (length, workers)
    }

    /// Copies the current process-wide configuration
    pub fn global() -> Self {
        GLOBAL_CONFIG
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the process-wide configuration used by the free functions
    pub fn install_global(self) {
        debug!(
            "Installing global search config: max_search_length={}, max_search_workers={}",
            self.max_search_length, self.max_search_workers
        );
        *GLOBAL_CONFIG
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = self;
    }

    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("slicescout/config.yaml")),
            // Local config
            Some(PathBuf::from(".slicescout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file that is missing is an error
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values; values given on
    /// the command line win
    pub fn merge_with_cli(
        mut self,
        max_search_length: Option<usize>,
        max_search_workers: Option<usize>,
        log_level: Option<String>,
    ) -> Self {
        if let Some(length) = max_search_length {
            self = self.with_max_search_length(length);
        }
        if let Some(workers) = max_search_workers {
            self = self.with_max_search_workers(workers);
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Renders the configuration as YAML
    pub fn to_yaml(&self) -> SearchResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

static GLOBAL_CONFIG: Lazy<RwLock<SearchConfig>> =
    Lazy::new(|| RwLock::new(SearchConfig::default()));

/// Returns the process-wide elements-per-worker setting
pub fn max_search_length() -> usize {
    SearchConfig::global().max_search_length
}

/// Sets the process-wide elements-per-worker setting; `0` resets it to
/// [`DEFAULT_MAX_SEARCH_LENGTH`]
pub fn set_max_search_length(length: usize) {
    let mut config = GLOBAL_CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    config.max_search_length = if length > 0 {
        length
    } else {
        DEFAULT_MAX_SEARCH_LENGTH
    };
}

/// Returns the process-wide worker cap
pub fn max_search_workers() -> usize {
    SearchConfig::global().max_search_workers
}

/// Sets the process-wide worker cap; `0` resets it to
/// [`DEFAULT_MAX_SEARCH_WORKERS`]
pub fn set_max_search_workers(workers: usize) {
    let mut config = GLOBAL_CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    config.max_search_workers = if workers > 0 {
        workers
    } else {
        DEFAULT_MAX_SEARCH_WORKERS
    };
}
