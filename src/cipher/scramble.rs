use crate::alphabet::Alphabet;
use crate::cipher::Cipher;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};
use sha3::{Digest, Sha3_256};

/// Monoalphabetic substitution by a keyed permutation of the alphabet.
/// Symbols outside the alphabet pass through unchanged.
#[derive(Debug, Clone)]
pub struct ScrambleCipher {
    alphabet: Alphabet,
    /// `permutation[i]` is the index substituted for alphabet index `i`
    permutation: Vec<usize>,
    inverse: Vec<usize>,
}

impl ScrambleCipher {
    /// Derive the substitution deterministically from a passphrase
    pub fn from_passphrase(passphrase: &str, alphabet: Alphabet) -> Self {
        let mut rng = StdRng::from_seed(compute_seed(passphrase));
        let mut permutation: Vec<usize> = (0..alphabet.len()).collect();
        permutation.shuffle(&mut rng);

        let mut inverse = vec![0usize; permutation.len()];
        for (from, &to) in permutation.iter().enumerate() {
            inverse[to] = from;
        }

        Self {
            alphabet,
            permutation,
            inverse,
        }
    }

    /// Substituted alphabet, in alphabet order
    pub fn substitution(&self) -> String {
        self.permutation
            .iter()
            .filter_map(|&i| self.alphabet.symbol(i))
            .collect()
    }

    fn apply(&self, text: &str, table: &[usize]) -> String {
        text.chars()
            .map(|c| {
                self.alphabet
                    .index_of(c)
                    .and_then(|i| self.alphabet.symbol(table[i]))
                    .unwrap_or(c)
            })
            .collect()
    }
}

impl Cipher for ScrambleCipher {
    fn name(&self) -> &'static str {
        "scramble"
    }

    fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        Ok(self.apply(plaintext, &self.permutation))
    }

    fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        Ok(self.apply(ciphertext, &self.inverse))
    }
}

/// 32-byte generator seed from the passphrase
fn compute_seed(passphrase: &str) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(passphrase.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_passes_unknown_symbols() {
        let mut cipher = ScrambleCipher::from_passphrase("hunter2", Alphabet::default());
        let plaintext = "the quick brown fox, jumped!";
        let ciphertext = cipher.encrypt(plaintext).unwrap();
        assert_ne!(ciphertext, plaintext);
        assert_eq!(ciphertext.matches(' ').count(), 4);
        assert!(ciphertext.ends_with('!'));
        assert_eq!(cipher.decrypt(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_substitution_is_a_permutation() {
        let cipher = ScrambleCipher::from_passphrase("key", Alphabet::default());
        let mut symbols: Vec<char> = cipher.substitution().chars().collect();
        symbols.sort();
        assert_eq!(symbols, Alphabet::default().symbols());
    }

    #[test]
    fn test_passphrase_determines_substitution() {
        let a = ScrambleCipher::from_passphrase("alpha", Alphabet::default());
        let b = ScrambleCipher::from_passphrase("alpha", Alphabet::default());
        let c = ScrambleCipher::from_passphrase("beta", Alphabet::default());
        assert_eq!(a.substitution(), b.substitution());
        assert_ne!(a.substitution(), c.substitution());
    }
}
