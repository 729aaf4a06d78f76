use crate::error::{CipherError, Result};
use std::collections::{BTreeMap, HashMap};

/// Two adjacent symbols
pub type Bigram = [char; 2];

/// Bigram occurrence counts
pub type BigramCounts = BTreeMap<Bigram, usize>;

/// Bigram relative frequencies, summing to 1.0
pub type BigramProfile = BTreeMap<Bigram, f64>;

/// Overlapping two-symbol windows of `text`, step 1
pub fn bigrams(text: &str) -> Vec<Bigram> {
    let symbols: Vec<char> = text.chars().collect();
    symbols.windows(2).map(|w| [w[0], w[1]]).collect()
}

/// Count occurrences of each bigram
pub fn frequency_table(bigrams: &[Bigram]) -> BigramCounts {
    let mut counts = BigramCounts::new();
    for bigram in bigrams {
        *counts.entry(*bigram).or_insert(0) += 1;
    }
    counts
}

/// Convert counts to relative frequencies
pub fn normalize(counts: &BigramCounts) -> BigramProfile {
    let total: usize = counts.values().sum();
    if total == 0 {
        return BigramProfile::new();
    }
    counts
        .iter()
        .map(|(bigram, &count)| (*bigram, count as f64 / total as f64))
        .collect()
}

/// Normalized bigram profile of `text`
pub fn profile(text: &str) -> BigramProfile {
    normalize(&frequency_table(&bigrams(text)))
}

/// Index of coincidence: probability that two symbols drawn without
/// replacement from `text` are equal
pub fn index_of_coincidence(text: &str) -> Result<f64> {
    let mut freq: HashMap<char, u64> = HashMap::new();
    let mut len = 0u64;
    for symbol in text.chars() {
        *freq.entry(symbol).or_insert(0) += 1;
        len += 1;
    }
    if len < 2 {
        return Err(CipherError::UndefinedStatistic { len: len as usize });
    }
    let numerator: u64 = freq.values().map(|&c| c * (c - 1)).sum();
    Ok(numerator as f64 / (len * (len - 1)) as f64)
}

/// Most frequent bigrams, count descending then bigram ascending
pub fn top_bigrams(text: &str, limit: usize) -> Vec<(Bigram, usize)> {
    let mut items: Vec<_> = frequency_table(&bigrams(text)).into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    items.truncate(limit);
    items
}

/// Most frequent single symbols, count descending then symbol ascending
pub fn top_symbols(text: &str, limit: usize) -> Vec<(char, usize)> {
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    for symbol in text.chars() {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    let mut items: Vec<_> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    items.truncate(limit);
    items
}

pub fn format_bigram(bigram: &Bigram) -> String {
    bigram.iter().collect()
}
