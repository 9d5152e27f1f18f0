//! Build helpers: shell completions and man pages for `wordwise`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "wordwise build helpers")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
    /// Generate man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().command {
        Task::Completions { out_dir } => completions(&out_dir),
        Task::Man { out_dir } => man(&out_dir),
    }
}

fn completions(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;
    let mut cmd = wordwise::command();
    for shell in Shell::value_variants() {
        let path = clap_complete::generate_to(*shell, &mut cmd, "wordwise", out_dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn man(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;
    let cmd = wordwise::command();
    clap_mangen::generate_to(cmd, out_dir)
        .with_context(|| format!("failed to write man pages to {}", out_dir.display()))?;
    println!("wrote man pages to {}", out_dir.display());
    Ok(())
}
