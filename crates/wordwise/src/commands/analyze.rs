//! Analyze command: word count, longest word, and total word length.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordwise_core::config::Config;
use wordwise_core::{Analysis, AnalysisKind, Analyzer, SeparatorSet};

use super::frequency::print_frequency;
use super::read_input_file;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Separator set used to split words (overrides config).
    #[arg(long, value_enum)]
    pub separators: Option<SeparatorSet>,

    /// Run a single analysis instead of the full report.
    #[arg(long, value_enum, value_name = "KIND")]
    pub only: Option<AnalysisKind>,

    /// Fail when the file has more words than this.
    #[arg(long)]
    pub max_words: Option<usize>,
}

/// Analyze a file and optionally check its word count against a limit.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, only = ?args.only, "executing analyze command");

    let content = read_input_file(&args.file, max_input)?;
    let analyzer = Analyzer::new(
        args.separators.unwrap_or(config.separators),
        config.frequency_mode,
    );
    let report = analyzer.analyze(&content);

    match args.only {
        Some(kind) => {
            let analysis = analyzer.run(&content, kind);
            if global_json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
        None if global_json => println!("{}", serde_json::to_string_pretty(&report)?),
        None => {
            println!("{}", args.file.bold());
            println!("  {} {}", "Words:".cyan(), report.word_count);
            if report.longest_word.is_empty() {
                println!("  {} {}", "Longest:".cyan(), "(none)".dimmed());
            } else {
                println!("  {} '{}'", "Longest:".cyan(), report.longest_word);
            }
            println!("  {} {}", "Total length:".cyan(), report.total_word_length);
        }
    }

    if let Some(max) = args.max_words.or(config.max_words)
        && report.word_count > max
    {
        bail!(
            "{} has {} words (limit: {max}). Trim it.",
            args.file,
            report.word_count.red(),
        );
    }

    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    match analysis {
        Analysis::WordCount(n) | Analysis::TextLength(n) | Analysis::TotalWordLength(n) => {
            println!("{n}");
        }
        Analysis::LongestWord(word) => println!("{word}"),
        Analysis::CharacterFrequency(freq) => print_frequency(freq, None),
    }
}
