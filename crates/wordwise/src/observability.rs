//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr (stdout carries command output and, for
//! `serve`, the MCP protocol). When a log file or directory is configured,
//! structured JSONL logs are also written there through a non-blocking
//! writer.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Explicit log file path.
const LOG_PATH_ENV: &str = "WORDWISE_LOG_PATH";
/// Log directory (daily-rotated `wordwise.*.jsonl` files).
const LOG_DIR_ENV: &str = "WORDWISE_LOG_DIR";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Exact file to append to (never rotated).
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated files.
    pub log_dir: Option<PathBuf>,
    /// Filter for the stderr layer.
    pub console_filter: Option<String>,
}

impl ObservabilityConfig {
    /// Read `WORDWISE_LOG_PATH`/`WORDWISE_LOG_DIR`, falling back to the
    /// configured log directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            log_dir: std::env::var_os(LOG_DIR_ENV)
                .map(PathBuf::from)
                .or(config_log_dir),
            console_filter: None,
        }
    }

    /// Set the stderr verbosity from the `--quiet`/`--verbose` flags.
    pub fn with_console_level(mut self, quiet: bool, verbose: u8) -> Self {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        self.console_filter = Some(level.to_string());
        self
    }

    fn file_appender(&self) -> anyhow::Result<Option<RollingFileAppender>> {
        if let Some(ref path) = self.log_path {
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .with_context(|| format!("invalid log file path: {}", path.display()))?;
            let dir = path
                .parent()
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(&dir)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            return Ok(Some(appender));
        }

        if let Some(ref dir) = self.log_dir {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("wordwise")
                .filename_suffix("jsonl")
                .build(dir)
                .with_context(|| format!("failed to open log directory {}", dir.display()))?;
            return Ok(Some(appender));
        }

        Ok(None)
    }
}

/// Build the filter for file logs.
///
/// `RUST_LOG` wins when set; otherwise `--quiet` forces `error`, `-v` raises
/// to `debug`, `-vv` to `trace`, and the configured level applies.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit so buffered file logs are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    file_filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.console_filter.as_deref().unwrap_or("warn"))
    });
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let (file_layer, guard) = match config.file_appender()? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_level_follows_flags() {
        let config = ObservabilityConfig::default();
        assert_eq!(
            config.clone().with_console_level(true, 3).console_filter.as_deref(),
            Some("error")
        );
        assert_eq!(
            config.clone().with_console_level(false, 0).console_filter.as_deref(),
            Some("warn")
        );
        assert_eq!(
            config.with_console_level(false, 2).console_filter.as_deref(),
            Some("debug")
        );
    }

    #[test]
    fn no_file_appender_without_destination() {
        let config = ObservabilityConfig::default();
        assert!(config.file_appender().unwrap().is_none());
    }

    #[test]
    fn log_dir_creates_appender() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ObservabilityConfig {
            log_dir: Some(tmp.path().to_path_buf()),
            ..ObservabilityConfig::default()
        };
        assert!(config.file_appender().unwrap().is_some());
    }
}
