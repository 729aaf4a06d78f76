use crate::analysis::frequency::index_of_coincidence;
use crate::error::{CipherError, Result};

/// Expected index of coincidence for natural-language text
pub const EXPECTED_IC: f64 = 0.068;

/// Largest key length considered by default
pub const MAX_KEY_LENGTH: usize = 20;

/// Smallest key length considered
pub const MIN_KEY_LENGTH: usize = 2;

/// Score of one candidate key length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyLengthScore {
    pub key_length: usize,
    pub average_ic: f64,
    /// Distance from the expected IC, lower is better
    pub score: f64,
}

/// Periodicity scan over candidate key lengths
#[derive(Debug, Clone, Copy)]
pub struct KeyLengthEstimator {
    pub expected_ic: f64,
    pub max_key_length: usize,
}

impl Default for KeyLengthEstimator {
    fn default() -> Self {
        Self {
            expected_ic: EXPECTED_IC,
            max_key_length: MAX_KEY_LENGTH,
        }
    }
}

impl KeyLengthEstimator {
    /// Score every candidate length in `MIN_KEY_LENGTH..=min(max, len/2)`
    pub fn scores(&self, ciphertext: &str) -> Result<Vec<KeyLengthScore>> {
        let symbols: Vec<char> = ciphertext.chars().collect();
        let upper = self.max_key_length.min(symbols.len() / 2);
        if upper < MIN_KEY_LENGTH {
            return Err(CipherError::TextTooShort {
                len: symbols.len(),
                min: MIN_KEY_LENGTH * 2,
            });
        }

        Ok((MIN_KEY_LENGTH..=upper)
            .map(|key_length| {
                let average_ic = average_ic(&symbols, key_length);
                KeyLengthScore {
                    key_length,
                    average_ic,
                    score: (self.expected_ic - average_ic).abs(),
                }
            })
            .collect())
    }

    /// Best scoring key length; ties go to the smallest length
    pub fn estimate(&self, ciphertext: &str) -> Result<usize> {
        let mut best: Option<KeyLengthScore> = None;
        for candidate in self.scores(ciphertext)? {
            match best {
                Some(current) if candidate.score >= current.score => {}
                _ => best = Some(candidate),
            }
        }
        best.map(|b| b.key_length).ok_or(CipherError::TextTooShort {
            len: ciphertext.chars().count(),
            min: MIN_KEY_LENGTH * 2,
        })
    }
}

/// Estimate the key length with the default estimator
pub fn estimate_key_length(ciphertext: &str) -> Result<usize> {
    KeyLengthEstimator::default().estimate(ciphertext)
}

/// Mean IC over the `key_length` interleaved columns; columns too short to
/// have an IC are left out, and 0.0 is returned if none remain
fn average_ic(symbols: &[char], key_length: usize) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;
    for offset in 0..key_length {
        let column: String = symbols.iter().skip(offset).step_by(key_length).collect();
        if let Ok(ic) = index_of_coincidence(&column) {
            total += ic;
            counted += 1;
        }
    }
    if counted == 0 {
        0.0
    } else {
        total / counted as f64
    }
}
