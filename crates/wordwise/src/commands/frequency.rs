//! Frequency command: character tallies for a file.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use wordwise_core::config::Config;
use wordwise_core::{CharacterFrequency, FrequencyMode, character_frequency};

use super::read_input_file;

/// Arguments for the `frequency` subcommand.
#[derive(Args, Debug)]
pub struct FrequencyArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Which characters count and how they are normalized (overrides config).
    #[arg(long, value_enum)]
    pub mode: Option<FrequencyMode>,

    /// Show only the N most frequent characters.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct FrequencyOutput {
    mode: FrequencyMode,
    unique: usize,
    total: usize,
    counts: Vec<CharCount>,
}

#[derive(Serialize)]
struct CharCount {
    char: char,
    count: usize,
}

/// Print character frequency for a file, most frequent first.
#[instrument(name = "cmd_frequency", skip_all, fields(file = %args.file))]
pub fn cmd_frequency(
    args: FrequencyArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    let mode = args.mode.unwrap_or(config.frequency_mode);
    debug!(file = %args.file, %mode, top = ?args.top, "executing frequency command");

    let content = read_input_file(&args.file, max_input)?;
    let freq = character_frequency(&content, mode);

    if global_json {
        let output = FrequencyOutput {
            mode,
            unique: freq.unique(),
            total: freq.total(),
            counts: ranked(&freq, args.top)
                .into_iter()
                .map(|(char, count)| CharCount { char, count })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {} unique, {} total",
            args.file.bold(),
            freq.unique(),
            freq.total()
        );
        print_frequency(&freq, args.top);
    }

    Ok(())
}

fn ranked(freq: &CharacterFrequency, top: Option<usize>) -> Vec<(char, usize)> {
    let mut counts = freq.by_count();
    if let Some(n) = top {
        counts.truncate(n);
    }
    counts
}

/// Print one `'c'  count` line per character, most frequent first.
pub(crate) fn print_frequency(freq: &CharacterFrequency, top: Option<usize>) {
    for (ch, count) in ranked(freq, top) {
        println!("  {:<6} {}", format!("{ch:?}").cyan(), count);
    }
}
