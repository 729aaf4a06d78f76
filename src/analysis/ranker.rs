//! Brute-force ranking of candidate column orders.
//!
//! Every permutation of `0..key_length` is tried as a column order in
//! lexicographic order. Each candidate decryption is profiled by bigram
//! frequency and scored against a reference table; the lowest score wins
//! and ties keep the earliest candidate.

use crate::analysis::frequency::{profile, BigramProfile};
use crate::analysis::keylength::KeyLengthEstimator;
use crate::analysis::reference::ReferenceTable;
use crate::error::{CipherError, Result};
use crate::key::{ColumnOrder, Key};
use crate::transpose::{decrypt, Padding};

/// Longest key searched exhaustively without a candidate budget
pub const MAX_EXHAUSTIVE_KEY_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub max_exhaustive_length: usize,
    /// Stop after this many candidates and keep the best seen so far
    pub max_candidates: Option<usize>,
    /// Report progress every N candidates
    pub progress_every: Option<usize>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            max_exhaustive_length: MAX_EXHAUSTIVE_KEY_LENGTH,
            max_candidates: None,
            progress_every: None,
        }
    }
}

/// Snapshot handed to the progress callback
#[derive(Debug, Clone, Copy)]
pub struct RankProgress {
    pub tried: usize,
    pub best_score: f64,
}

/// Best candidate found by [`rank`]
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub order: Vec<usize>,
    pub plaintext: String,
    pub score: f64,
    pub candidates_tried: usize,
}

/// Sum of absolute frequency differences over bigrams present in both the
/// candidate profile and the reference; bigrams unknown to the reference
/// are ignored
pub fn score_profile(candidate: &BigramProfile, reference: &ReferenceTable) -> f64 {
    candidate
        .iter()
        .filter_map(|(bigram, freq)| reference.get(bigram).map(|expected| (freq - expected).abs()))
        .sum()
}

/// Profile `text` and score it against `reference`
pub fn score_text(text: &str, reference: &ReferenceTable) -> f64 {
    score_profile(&profile(text), reference)
}

/// Rank every column order of length `key_length`
pub fn rank(
    ciphertext: &str,
    key_length: usize,
    reference: &ReferenceTable,
    options: &RankOptions,
) -> Result<RankedCandidate> {
    rank_with_progress(ciphertext, key_length, reference, options, &mut |_| {})
}

/// [`rank`] with a callback invoked every `options.progress_every` candidates
pub fn rank_with_progress(
    ciphertext: &str,
    key_length: usize,
    reference: &ReferenceTable,
    options: &RankOptions,
    on_progress: &mut dyn FnMut(&RankProgress),
) -> Result<RankedCandidate> {
    if key_length == 0 {
        return Err(CipherError::LengthMismatch("key length must be at least 1".into()));
    }
    if key_length > options.max_exhaustive_length && options.max_candidates.is_none() {
        return Err(CipherError::SearchTooLarge {
            key_length,
            limit: options.max_exhaustive_length,
        });
    }
    let budget = options.max_candidates.unwrap_or(usize::MAX).max(1);

    let mut order: Vec<usize> = (0..key_length).collect();
    let mut best: Option<RankedCandidate> = None;
    let mut tried = 0usize;

    loop {
        let key = Key::from_order(ColumnOrder::new(order.clone())?)?;
        let plaintext = decrypt(ciphertext, &key, &mut Padding::None)?;
        let score = score_text(&plaintext, reference);
        tried += 1;

        let improved = best.as_ref().map_or(true, |b| score < b.score);
        if improved {
            best = Some(RankedCandidate {
                order: order.clone(),
                plaintext,
                score,
                candidates_tried: tried,
            });
        }

        if let (Some(every), Some(current)) = (options.progress_every, best.as_ref()) {
            if every > 0 && tried % every == 0 {
                on_progress(&RankProgress {
                    tried,
                    best_score: current.score,
                });
            }
        }

        if tried >= budget || !next_permutation(&mut order) {
            break;
        }
    }

    let mut best = best.ok_or_else(|| CipherError::LengthMismatch("no candidates".into()))?;
    best.candidates_tried = tried;
    Ok(best)
}

/// Advance `items` to the next lexicographic permutation; false once the
/// last permutation has been reached
pub fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut pivot = items.len() - 1;
    while pivot > 0 && items[pivot - 1] >= items[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }
    let mut successor = items.len() - 1;
    while items[successor] <= items[pivot - 1] {
        successor -= 1;
    }
    items.swap(pivot - 1, successor);
    items[pivot..].reverse();
    true
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CrackOptions {
    /// Skip estimation and use this key length
    pub key_length: Option<usize>,
    pub estimator: KeyLengthEstimator,
    pub rank: RankOptions,
}

/// Result of the full attack
#[derive(Debug, Clone)]
pub struct CrackOutcome {
    pub key_length: usize,
    pub estimated: bool,
    pub best: RankedCandidate,
}

/// Estimate the key length, then rank column orders of that length
pub fn crack(
    ciphertext: &str,
    reference: &ReferenceTable,
    options: &CrackOptions,
) -> Result<CrackOutcome> {
    crack_with_progress(ciphertext, reference, options, &mut |_| {})
}

pub fn crack_with_progress(
    ciphertext: &str,
    reference: &ReferenceTable,
    options: &CrackOptions,
    on_progress: &mut dyn FnMut(&RankProgress),
) -> Result<CrackOutcome> {
    let (key_length, estimated) = match options.key_length {
        Some(length) => (length, false),
        None => {
            // Without a budget only exhaustively searchable lengths are candidates
            let mut estimator = options.estimator;
            if options.rank.max_candidates.is_none() {
                estimator.max_key_length = estimator
                    .max_key_length
                    .min(options.rank.max_exhaustive_length);
            }
            (estimator.estimate(ciphertext)?, true)
        }
    };
    let best = rank_with_progress(ciphertext, key_length, reference, &options.rank, on_progress)?;
    Ok(CrackOutcome {
        key_length,
        estimated,
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::RankDirection;
    use crate::transpose::encrypt;

    const PLAINTEXT: &str = "wearediscoveredfleeatonceandmeetusatthebridgebeforedawn";

    #[test]
    fn test_next_permutation_lexicographic() {
        let mut items = vec![0, 1, 2];
        let mut seen = vec![items.clone()];
        while next_permutation(&mut items) {
            seen.push(items.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
        assert!(!next_permutation(&mut [0]));
    }

    #[test]
    fn test_score_ignores_unknown_bigrams() {
        let reference: ReferenceTable = vec![(['a', 'b'], 1.0)].into_iter().collect();
        // profile: ab 1/3, ba 2/3
        assert!((score_text("baba", &reference) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(score_text("xyz", &reference), 0.0);
        assert_eq!(score_text("", &reference), 0.0);
    }

    #[test]
    fn test_rank_two_columns_by_hand() {
        // "abab" under order [1, 0] encrypts to "bbaa"
        let reference: ReferenceTable = vec![(['a', 'b'], 1.0)].into_iter().collect();
        let key = Key::from_order(ColumnOrder::new(vec![1, 0]).unwrap()).unwrap();
        let ciphertext = encrypt("abab", &key, &mut Padding::None).unwrap();
        assert_eq!(ciphertext, "bbaa");

        let best = rank(&ciphertext, 2, &reference, &RankOptions::default()).unwrap();
        assert_eq!(best.order, vec![1, 0]);
        assert_eq!(best.plaintext, "abab");
        assert!((best.score - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(best.candidates_tried, 2);
    }

    #[test]
    fn test_rank_never_beats_the_true_order() {
        let key = Key::build("zebra", false, RankDirection::Ascending).unwrap();
        let ciphertext = encrypt(PLAINTEXT, &key, &mut Padding::None).unwrap();
        let reference = ReferenceTable::english();

        let best = rank(&ciphertext, 5, &reference, &RankOptions::default()).unwrap();
        assert_eq!(best.candidates_tried, 120);
        assert!(best.score <= score_text(PLAINTEXT, &reference));
        assert_eq!(best.plaintext.len(), PLAINTEXT.len());

        // The reported plaintext is the decryption under the reported order
        let winner = Key::from_order(ColumnOrder::new(best.order.clone()).unwrap()).unwrap();
        assert_eq!(
            decrypt(&ciphertext, &winner, &mut Padding::None).unwrap(),
            best.plaintext
        );
    }

    #[test]
    fn test_rank_is_deterministic() {
        let key = Key::build("cab", false, RankDirection::Ascending).unwrap();
        let ciphertext = encrypt(PLAINTEXT, &key, &mut Padding::None).unwrap();
        let reference = ReferenceTable::english();
        let a = rank(&ciphertext, 3, &reference, &RankOptions::default()).unwrap();
        let b = rank(&ciphertext, 3, &reference, &RankOptions::default()).unwrap();
        assert_eq!(a.order, b.order);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_single_column_is_identity() {
        let best = rank("hello", 1, &ReferenceTable::english(), &RankOptions::default()).unwrap();
        assert_eq!(best.order, vec![0]);
        assert_eq!(best.plaintext, "hello");
        assert_eq!(best.candidates_tried, 1);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            rank("hello", 0, &ReferenceTable::english(), &RankOptions::default()),
            Err(CipherError::LengthMismatch(_))
        ));
    }

    #[test]
    fn test_large_search_needs_budget() {
        let reference = ReferenceTable::english();
        assert!(matches!(
            rank(PLAINTEXT, 9, &reference, &RankOptions::default()),
            Err(CipherError::SearchTooLarge { key_length: 9, limit: 8 })
        ));

        let options = RankOptions {
            max_candidates: Some(50),
            ..Default::default()
        };
        let best = rank(PLAINTEXT, 9, &reference, &options).unwrap();
        assert_eq!(best.candidates_tried, 50);
    }

    #[test]
    fn test_progress_callback() {
        let options = RankOptions {
            progress_every: Some(6),
            ..Default::default()
        };
        let mut reports = Vec::new();
        rank_with_progress(PLAINTEXT, 4, &ReferenceTable::english(), &options, &mut |p| {
            reports.push(p.tried)
        })
        .unwrap();
        assert_eq!(reports, vec![6, 12, 18, 24]);
    }

    #[test]
    fn test_crack_uses_fixed_length_when_given() {
        let key = Key::build("cab", false, RankDirection::Ascending).unwrap();
        let ciphertext = encrypt(PLAINTEXT, &key, &mut Padding::None).unwrap();
        let options = CrackOptions {
            key_length: Some(3),
            ..Default::default()
        };
        let outcome = crack(&ciphertext, &ReferenceTable::english(), &options).unwrap();
        assert_eq!(outcome.key_length, 3);
        assert!(!outcome.estimated);
        assert_eq!(outcome.best.candidates_tried, 6);
    }

    #[test]
    fn test_crack_estimates_length() {
        let outcome = crack(
            "thisisateststring",
            &ReferenceTable::english(),
            &CrackOptions::default(),
        )
        .unwrap();
        assert!(outcome.estimated);
        assert!((2..=8).contains(&outcome.key_length));
    }

    #[test]
    fn test_crack_default_options_stay_searchable() {
        let key = Key::build("zebra", false, RankDirection::Ascending).unwrap();
        let ciphertext = encrypt(PLAINTEXT, &key, &mut Padding::None).unwrap();
        let reference = ReferenceTable::english();

        let outcome = crack(&ciphertext, &reference, &CrackOptions::default()).unwrap();
        assert!(outcome.estimated);
        assert!((2..=MAX_EXHAUSTIVE_KEY_LENGTH).contains(&outcome.key_length));
        assert_eq!(outcome.best.plaintext.len(), PLAINTEXT.len());

        let winner = Key::from_order(ColumnOrder::new(outcome.best.order.clone()).unwrap()).unwrap();
        assert_eq!(
            decrypt(&ciphertext, &winner, &mut Padding::None).unwrap(),
            outcome.best.plaintext
        );
    }

    #[test]
    fn test_crack_with_budget_keeps_full_estimate_range() {
        let key = Key::build("zebra", false, RankDirection::Ascending).unwrap();
        let ciphertext = encrypt(PLAINTEXT, &key, &mut Padding::None).unwrap();
        let options = CrackOptions {
            rank: RankOptions {
                max_candidates: Some(100),
                ..Default::default()
            },
            ..Default::default()
        };
        let outcome = crack(&ciphertext, &ReferenceTable::english(), &options).unwrap();
        let expected = KeyLengthEstimator::default().estimate(&ciphertext).unwrap();
        assert_eq!(outcome.key_length, expected);
        assert!(outcome.best.candidates_tried <= 100);
    }
}
