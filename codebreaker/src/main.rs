mod crack;
mod stats;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coltrans::analysis::{KeyLengthEstimator, ReferenceTable};
use crack::{run as run_crack, CrackFileOptions};
use stats::{run as run_stats, StatsOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "codebreaker")]
#[command(about = "Cryptanalysis toolkit for columnar transposition ciphertext")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Frequency, entropy and periodicity report for a ciphertext
    Stats {
        /// Ciphertext file
        file: PathBuf,

        /// Reference bigram table (`xy 0.0123` per line)
        #[arg(long)]
        bigrams: Option<PathBuf>,

        /// Number of bigrams and key lengths to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Estimate the key length of a ciphertext
    Estimate {
        /// Ciphertext file
        file: PathBuf,
    },

    /// Recover the column order and plaintext
    Crack {
        /// Ciphertext file
        file: PathBuf,

        /// Reference bigram table (`xy 0.0123` per line)
        #[arg(long)]
        bigrams: Option<PathBuf>,

        /// Skip estimation and assume this key length
        #[arg(long)]
        key_length: Option<usize>,

        /// Stop after this many candidate orders
        #[arg(long)]
        max_candidates: Option<usize>,

        /// Print search progress to stderr
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Read a ciphertext file, dropping one trailing line ending
pub(crate) fn read_ciphertext(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let trimmed = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(&text);
    Ok(trimmed.to_string())
}

pub(crate) fn load_reference(path: Option<&Path>) -> Result<ReferenceTable> {
    match path {
        Some(path) => ReferenceTable::load(path)
            .with_context(|| format!("failed to load bigram table {}", path.display())),
        None => Ok(ReferenceTable::english()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Stats { file, bigrams, top } => {
            let options = StatsOptions {
                reference: bigrams,
                top,
            };
            let report = run_stats(&file, &options)?;
            print!("{}", report);
        }
        Commands::Estimate { file } => {
            let ciphertext = read_ciphertext(&file)?;
            let key_length = KeyLengthEstimator::default().estimate(&ciphertext)?;
            println!("Estimated key length: {}", key_length);
        }
        Commands::Crack {
            file,
            bigrams,
            key_length,
            max_candidates,
            verbose,
        } => {
            let options = CrackFileOptions {
                reference: bigrams,
                key_length,
                max_candidates,
                verbose,
            };
            let report = run_crack(&file, &options)?;
            print!("{}", report);
        }
    }

    Ok(())
}
