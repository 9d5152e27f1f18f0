//! Compare command: word-count difference and longest shared word.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use wordwise_core::config::Config;
use wordwise_core::{Analyzer, SeparatorSet, compare};

use super::read_input_file;

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First file.
    pub left: Utf8PathBuf,

    /// Second file.
    pub right: Utf8PathBuf,

    /// Separator set used to split words (overrides config).
    #[arg(long, value_enum)]
    pub separators: Option<SeparatorSet>,
}

/// Compare two files.
#[instrument(name = "cmd_compare", skip_all, fields(left = %args.left, right = %args.right))]
pub fn cmd_compare(
    args: CompareArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(separators = ?args.separators, "executing compare command");

    let left = read_input_file(&args.left, max_input)?;
    let right = read_input_file(&args.right, max_input)?;
    let analyzer = Analyzer::new(
        args.separators.unwrap_or(config.separators),
        config.frequency_mode,
    );
    let report = compare(&analyzer, &left, &right);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}  {} words, longest '{}'",
        args.left.bold(),
        report.left.word_count,
        report.left.longest_word
    );
    println!(
        "{}  {} words, longest '{}'",
        args.right.bold(),
        report.right.word_count,
        report.right.longest_word
    );
    println!();
    println!(
        "{} {}",
        "Word count difference:".cyan(),
        report.word_count_difference
    );
    if report.common_longest_word.is_empty() {
        println!("{} {}", "Longest common word:".cyan(), "(none)".yellow());
    } else {
        println!(
            "{} '{}'",
            "Longest common word:".cyan(),
            report.common_longest_word.green()
        );
    }

    Ok(())
}
