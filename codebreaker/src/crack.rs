use anyhow::{bail, Result};
use coltrans::analysis::{crack_with_progress, CrackOptions, RankOptions};
use std::path::{Path, PathBuf};

/// Report progress every this many candidates in verbose mode
const PROGRESS_INTERVAL: usize = 5_000;

#[derive(Default)]
pub struct CrackFileOptions {
    pub reference: Option<PathBuf>,
    pub key_length: Option<usize>,
    pub max_candidates: Option<usize>,
    pub verbose: bool,
}

/// Estimate the key length of a ciphertext file and rank column orders
pub fn run(path: &Path, options: &CrackFileOptions) -> Result<String> {
    let ciphertext = crate::read_ciphertext(path)?;
    if ciphertext.is_empty() {
        bail!("File is empty");
    }
    let reference = crate::load_reference(options.reference.as_deref())?;

    let crack_options = CrackOptions {
        key_length: options.key_length,
        rank: RankOptions {
            max_candidates: options.max_candidates,
            progress_every: options.verbose.then_some(PROGRESS_INTERVAL),
            ..Default::default()
        },
        ..Default::default()
    };
    let outcome = crack_with_progress(&ciphertext, &reference, &crack_options, &mut |progress| {
        eprintln!(
            "  tried {} orders, best score {:.4}",
            progress.tried, progress.best_score
        );
    })?;

    let mut output = String::new();
    output.push_str("Columnar Transposition Crack\n");
    output.push_str("============================\n\n");
    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!(
        "Key length: {} ({})\n",
        outcome.key_length,
        if outcome.estimated { "estimated" } else { "fixed" }
    ));
    output.push_str(&format!("Candidates tried: {}\n", outcome.best.candidates_tried));
    output.push_str(&format!("Column order: {:?}\n", outcome.best.order));
    output.push_str(&format!("Score: {:.6}\n", outcome.best.score));
    output.push_str(&format!("Plaintext: {}\n", outcome.best.plaintext));
    Ok(output)
}
