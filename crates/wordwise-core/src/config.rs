//! Configuration loading and discovery.
//!
//! This module provides configuration file discovery by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from XDG config directory
//! 3. Merging with sensible defaults
//!
//! # Supported formats
//!
//! The following configuration file formats are supported:
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `wordwise.<ext>` in current directory or any parent
//! - `.wordwise.<ext>` in current directory or any parent
//! - `~/.config/wordwise/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! When multiple files exist in the same directory, all are merged via figment.
//! Later extensions override earlier: toml < yaml < yml < json.
//!
//! Environment variables prefixed with `WORDWISE_` override every file, e.g.
//! `WORDWISE_FREQUENCY_MODE=alnum-lowercase`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use wordwise_core::config::{Config, ConfigLoader};
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::analyzer::FrequencyMode;
use crate::error::{ConfigError, ConfigResult};
use crate::store::{DEFAULT_HISTORY_CAPACITY, DEFAULT_STATISTICS_CAPACITY};
use crate::tokenize::SeparatorSet;

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// The configuration for wordwise.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON). Missing keys fall back to [`Config::default`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files (no file logging when unset).
    pub log_dir: Option<Utf8PathBuf>,
    /// Characters that separate words ("basic" or "extended").
    pub separators: SeparatorSet,
    /// Character-frequency mode ("raw" or "alnum-lowercase").
    pub frequency_mode: FrequencyMode,
    /// Number of analysis summaries kept in history (at least 1).
    pub history_capacity: usize,
    /// Number of word counts kept in statistics (at least 1).
    pub statistics_capacity: usize,
    /// Default word limit for the `analyze` command.
    pub max_words: Option<usize>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Prevents resource exhaustion from oversized inputs in both CLI and MCP server.
    /// Omit to use the default (5 MiB). Use `disable_input_limit` to remove the
    /// limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    /// Default: `false`.
    pub disable_input_limit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            separators: SeparatorSet::default(),
            frequency_mode: FrequencyMode::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            statistics_capacity: DEFAULT_STATISTICS_CAPACITY,
            max_words: None,
            max_input_bytes: None,
            disable_input_limit: false,
        }
    }
}

impl Config {
    /// Reject settings that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if either store capacity is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        for (store, capacity) in [
            ("history", self.history_capacity),
            ("statistics", self.statistics_capacity),
        ] {
            if capacity == 0 {
                return Err(ConfigError::InvalidCapacity { store, capacity });
            }
        }
        Ok(())
    }

    /// Effective input size limit, or `None` when the limit is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "wordwise";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "WORDWISE_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/wordwise/`.
    #[cfg(test)]
    const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    #[cfg(test)]
    fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Returns the merged config alongside metadata about which files
    /// were loaded.
    ///
    /// Precedence (highest to lowest):
    /// 1. `WORDWISE_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest to search root)
    /// 4. User config (`~/.config/wordwise/config.<ext>`)
    /// 5. Default values
    ///
    /// An unknown `separators` or `frequency_mode` value, or a capacity
    /// below 1, fails here.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        // Start with user config (lowest precedence of file sources)
        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        // Add project configs (ordered low→high precedence)
        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        // Add explicit files
        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // WORDWISE_SEPARATORS=extended, WORDWISE_LOG_LEVEL=debug, etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        config.validate()?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            separators = %config.separators,
            frequency_mode = %config.frequency_mode,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has
    /// any match, dotfiles before regular files (low-to-high precedence).
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check for boundary marker AFTER checking config files,
            // so a config in the same directory as the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the project directories for XDG-compliant path resolution.
///
/// Returns `None` if the home directory cannot be determined.
fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the user config directory path.
///
/// Returns `~/.config/wordwise/` on Linux, `~/Library/Application Support/wordwise/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}
