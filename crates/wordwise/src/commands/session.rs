//! Session command: analyze several files through one engine and report
//! what the bounded history and statistics retained.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use wordwise_core::config::Config;
use wordwise_core::{AnalysisReport, Engine, EngineOptions, StatisticsSummary};

use super::read_input_file;

/// Arguments for the `session` subcommand.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Files to analyze, in order.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// History entries to keep (overrides config).
    #[arg(long, value_name = "N")]
    pub history_capacity: Option<usize>,

    /// Word counts to keep (overrides config).
    #[arg(long, value_name = "N")]
    pub statistics_capacity: Option<usize>,
}

#[derive(Serialize)]
struct FileReport {
    file: Utf8PathBuf,
    #[serde(flatten)]
    report: AnalysisReport,
}

#[derive(Serialize)]
struct SessionOutput {
    files: Vec<FileReport>,
    history: Vec<String>,
    statistics: Vec<usize>,
    summary: StatisticsSummary,
}

/// Run every file through a single engine, then print the retained state.
#[instrument(name = "cmd_session", skip_all, fields(files = args.files.len()))]
pub fn cmd_session(
    args: SessionArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let mut options = EngineOptions::from(config);
    if let Some(capacity) = args.history_capacity {
        options.history_capacity = capacity;
    }
    if let Some(capacity) = args.statistics_capacity {
        options.statistics_capacity = capacity;
    }
    debug!(?options, "executing session command");

    let engine = Engine::new(options).context("invalid session settings")?;

    let progress = if global_json || quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(args.files.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} {msg}")
                .context("invalid progress template")?,
        );
        bar
    };

    let mut files = Vec::with_capacity(args.files.len());
    for file in args.files {
        progress.set_message(file.to_string());
        let content = read_input_file(&file, max_input)?;
        let report = engine.analyze(&content);
        files.push(FileReport { file, report });
        progress.inc(1);
    }
    progress.finish_and_clear();

    let output = SessionOutput {
        files,
        history: engine.history().get_all(),
        statistics: engine.statistics().get_all(),
        summary: engine.statistics_summary(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for entry in &output.files {
        println!(
            "{}  {} words, longest '{}'",
            entry.file.bold(),
            entry.report.word_count,
            entry.report.longest_word
        );
    }

    println!();
    println!(
        "{} ({}/{})",
        "History".bold().underline(),
        output.history.len(),
        engine.history().capacity()
    );
    for (i, entry) in output.history.iter().enumerate() {
        println!("  {}. {entry}", i + 1);
    }

    let summary = &output.summary;
    println!();
    println!(
        "{} ({}/{})",
        "Statistics".bold().underline(),
        summary.samples,
        engine.statistics().capacity()
    );
    println!(
        "  {} {}  {} {}  {} {}  {} {:.1}",
        "total".dimmed(),
        summary.total,
        "min".dimmed(),
        summary.min,
        "max".dimmed(),
        summary.max,
        "mean".dimmed(),
        summary.mean
    );

    Ok(())
}
