//! Info command implementation

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};
use wordwise_core::config::{Config, ConfigSources};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    separators: String,
    frequency_mode: String,
    history_capacity: usize,
    statistics_capacity: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            separators: config.separators.to_string(),
            frequency_mode: config.frequency_mode.to_string(),
            history_capacity: config.history_capacity,
            statistics_capacity: config.statistics_capacity,
            max_words: config.max_words,
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information and the effective configuration.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: PackageInfo::new(),
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let package = &full_info.package;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        println!("{}: {}", "License".dimmed(), package.license);
    }
    if !package.repository.is_empty() {
        println!("{}: {}", "Repository".dimmed(), package.repository.cyan());
    }

    let config = &full_info.config;
    println!();
    println!("{}", "Configuration".bold().underline());
    match config.config_file {
        Some(ref path) => println!("{}: {}", "Config file".dimmed(), path.cyan()),
        None => println!("{}: {}", "Config file".dimmed(), "none loaded".yellow()),
    }
    println!("{}: {}", "Log level".dimmed(), config.log_level);
    if let Some(ref dir) = config.log_dir {
        println!("{}: {}", "Log directory".dimmed(), dir);
    }

    println!();
    println!("{}", "Analysis".bold().underline());
    println!("{}: {}", "Separators".dimmed(), config.separators);
    println!("{}: {}", "Frequency mode".dimmed(), config.frequency_mode);
    println!("{}: {}", "History capacity".dimmed(), config.history_capacity);
    println!(
        "{}: {}",
        "Statistics capacity".dimmed(),
        config.statistics_capacity
    );
    print_opt("Max words", &config.max_words);
    print_opt("Max input bytes", &config.max_input_bytes);

    Ok(())
}

/// Print an optional value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", label.dimmed(), v),
        None => println!("{}: {}", label.dimmed(), "(not set)".dimmed()),
    }
}
