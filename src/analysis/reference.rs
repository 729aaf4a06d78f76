use crate::analysis::frequency::Bigram;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

const ENGLISH_BIGRAMS: &str = include_str!("../../data/english_bigrams.txt");

/// Expected bigram frequencies of the target language
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    frequencies: HashMap<Bigram, f64>,
}

impl ReferenceTable {
    /// Parse `<bigram> <frequency>` records, one per line.
    /// Blank lines, `#` comments and malformed records are skipped.
    pub fn parse(text: &str) -> Self {
        let frequencies = text.lines().filter_map(parse_record).collect();
        Self { frequencies }
    }

    /// Load a table file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Built-in table of common English bigrams
    pub fn english() -> Self {
        Self::parse(ENGLISH_BIGRAMS)
    }

    pub fn get(&self, bigram: &Bigram) -> Option<f64> {
        self.frequencies.get(bigram).copied()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl FromIterator<(Bigram, f64)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (Bigram, f64)>>(iter: I) -> Self {
        Self {
            frequencies: iter.into_iter().collect(),
        }
    }
}

fn parse_record(line: &str) -> Option<(Bigram, f64)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return None;
    }
    let mut symbols = fields[0].chars();
    let bigram = [symbols.next()?, symbols.next()?];
    if symbols.next().is_some() {
        return None;
    }
    let frequency: f64 = fields[1].parse().ok()?;
    Some((bigram, frequency))
}
