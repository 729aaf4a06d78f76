use anyhow::{bail, Result};
use coltrans::analysis::{
    format_bigram, index_of_coincidence, score_text, top_bigrams, top_symbols,
    KeyLengthEstimator, ReferenceTable, EXPECTED_IC,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct StatsOptions {
    /// Reference bigram table (built-in English table by default)
    pub reference: Option<PathBuf>,
    /// How many bigrams and key lengths to list
    pub top: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            reference: None,
            top: 5,
        }
    }
}

/// Run text statistics on a ciphertext file.
pub fn run(path: &Path, options: &StatsOptions) -> Result<String> {
    let text = crate::read_ciphertext(path)?;
    if text.is_empty() {
        bail!("File is empty");
    }
    let reference = crate::load_reference(options.reference.as_deref())?;

    let mut output = String::new();
    output.push_str("Codebreaker Text Statistics\n");
    output.push_str("===========================\n\n");
    output.push_str(&format!("File: {}\n", path.display()));
    output.push_str(&format!("Symbols analyzed: {}\n\n", text.chars().count()));
    append_text_stats(&mut output, &text, &reference, options.top)?;
    Ok(output)
}

fn append_text_stats(
    output: &mut String,
    text: &str,
    reference: &ReferenceTable,
    top: usize,
) -> Result<()> {
    let mut report = Report::new("Transposition Fitness");

    let ic = index_of_coincidence(text).ok();
    report.add(
        "Frequency Analysis",
        "Unique Symbols",
        count_unique_symbols(text).to_string(),
        "Distinct symbols in the sample",
        Severity::Pass,
    );
    report.add(
        "Frequency Analysis",
        "Top Symbols",
        format_symbols(&top_symbols(text, top)),
        "Unigram counts survive transposition unchanged",
        Severity::Pass,
    );
    report.add(
        "Frequency Analysis",
        "Index of Coincidence",
        ic.map_or("undefined".into(), |ic| format!("{:.4}", ic)),
        format!("≈{:.3} for English; transposition preserves it", EXPECTED_IC),
        ic.map_or(Severity::Warn, severity_index_of_coincidence),
    );
    report.add(
        "Frequency Analysis",
        "Top Bigrams",
        format_bigrams(&top_bigrams(text, top)),
        "Highest-frequency 2-symbol sequences",
        Severity::Pass,
    );
    report.add(
        "Frequency Analysis",
        "Reference Score",
        format!("{:.4}", score_text(text, reference)),
        "Distance to the reference bigram table; lower is closer",
        Severity::Pass,
    );

    let entropy = calculate_entropy(text);
    report.add(
        "Entropy",
        "Shannon Entropy",
        format!("{:.4} bits/symbol", entropy),
        "≈4.1 for English letters",
        severity_entropy(entropy),
    );

    match KeyLengthEstimator::default().scores(text) {
        Ok(mut scores) => {
            scores.sort_by(|a, b| {
                a.score
                    .total_cmp(&b.score)
                    .then(a.key_length.cmp(&b.key_length))
            });
            for score in scores.iter().take(top) {
                report.add(
                    "Periodicity",
                    format!("Key length {}", score.key_length),
                    format!("avg IC {:.4}", score.average_ic),
                    format!("|Δ| = {:.4}", score.score),
                    Severity::Pass,
                );
            }
        }
        Err(e) => report.add("Periodicity", "Key length", "n/a", e.to_string(), Severity::Warn),
    }

    output.push_str(&report.render());
    Ok(())
}

/// Row verdict; the report status is the worst row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Severity {
    Pass,
    Warn,
    Fail,
}

impl Severity {
    fn badge(self) -> &'static str {
        match self {
            Severity::Pass => "✔ PASS",
            Severity::Warn => "⚠ WARN",
            Severity::Fail => "✖ FAIL",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Severity::Pass => FG_GREEN,
            Severity::Warn => FG_YELLOW,
            Severity::Fail => FG_RED,
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Severity::Pass => "(consistent with transposed language text)",
            Severity::Warn => "(weak language signal)",
            Severity::Fail => "(no language signal)",
        }
    }
}

fn severity_index_of_coincidence(ic: f64) -> Severity {
    match (ic - EXPECTED_IC).abs() {
        d if d < 0.015 => Severity::Pass,
        d if d < 0.03 => Severity::Warn,
        _ => Severity::Fail,
    }
}

fn severity_entropy(entropy: f64) -> Severity {
    if (3.5..=4.5).contains(&entropy) {
        Severity::Pass
    } else {
        Severity::Warn
    }
}

const HEADERS: [&str; 5] = ["Section", "Metric", "Value", "Notes", "Status"];

struct Row {
    section: &'static str,
    cells: [String; 4],
    severity: Severity,
}

/// Flat table of metric rows grouped by section
struct Report {
    title: &'static str,
    rows: Vec<Row>,
}

impl Report {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn add(
        &mut self,
        section: &'static str,
        metric: impl Into<String>,
        value: impl Into<String>,
        note: impl Into<String>,
        severity: Severity,
    ) {
        self.rows.push(Row {
            section,
            cells: [String::new(), metric.into(), value.into(), note.into()],
            severity,
        });
    }

    fn status(&self) -> Severity {
        self.rows
            .iter()
            .map(|row| row.severity)
            .max()
            .unwrap_or(Severity::Pass)
    }

    fn render(mut self) -> String {
        // Section name only on the first row of each group
        let mut previous = "";
        for row in &mut self.rows {
            if row.section != previous {
                row.cells[0] = row.section.to_string();
                previous = row.section;
            }
        }

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
                *width = (*width).max(cell.chars().count());
            }
            widths[4] = widths[4].max(row.severity.badge().chars().count());
        }

        let status = self.status();
        let mut output = format!(
            "{} {}\n\n",
            paint(&format!("{} {}", status.badge(), self.title), &[status.ansi(), BOLD]),
            paint(status.summary(), &[status.ansi()])
        );
        let separator = rule(&widths);
        output.push_str(&separator);
        output.push_str(&table_line(HEADERS.iter().copied(), &widths, None));
        output.push_str(&separator);
        for row in &self.rows {
            let cells = row
                .cells
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(row.severity.badge()));
            output.push_str(&table_line(cells, &widths, Some(row.severity)));
        }
        output.push_str(&separator);
        output
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

fn paint(text: &str, codes: &[&str]) -> String {
    format!("{}{}{}", codes.concat(), text, RESET)
}

fn rule(widths: &[usize; 5]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    format!("+{}+\n", segments.join("+"))
}

/// One `| a | b |` line; the status column is colored when `severity` is set
fn table_line<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize; 5],
    severity: Option<Severity>,
) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (cell, &width))| {
            let cell = format!("{:<width$}", cell, width = width);
            match severity {
                Some(severity) if i == HEADERS.len() - 1 => paint(&cell, &[severity.ansi()]),
                _ => cell,
            }
        })
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn format_symbols(symbols: &[(char, usize)]) -> String {
    if symbols.is_empty() {
        return "n/a".into();
    }
    symbols
        .iter()
        .map(|(symbol, count)| format!("{:?}×{}", symbol, count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_bigrams(bigrams: &[([char; 2], usize)]) -> String {
    if bigrams.is_empty() {
        return "n/a".into();
    }
    bigrams
        .iter()
        .map(|(bigram, count)| format!("{}×{}", format_bigram(bigram), count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn count_unique_symbols(text: &str) -> usize {
    let mut seen: Vec<char> = text.chars().collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Shannon entropy in bits per symbol
fn calculate_entropy(text: &str) -> f64 {
    let mut freq: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in text.chars() {
        *freq.entry(c).or_insert(0) += 1;
        len += 1;
    }
    if len == 0 {
        return 0.0;
    }
    freq.values()
        .map(|&count| {
            let p = count as f64 / len as f64;
            -p * p.log2()
        })
        .sum()
}
