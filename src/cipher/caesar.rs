use crate::alphabet::Alphabet;
use crate::cipher::Cipher;
use crate::error::{CipherError, Result};

/// Shift every symbol a fixed number of positions through the alphabet
#[derive(Debug, Clone)]
pub struct CaesarCipher {
    shift: i64,
    alphabet: Alphabet,
}

impl CaesarCipher {
    pub fn new(shift: i64, alphabet: Alphabet) -> Self {
        Self { shift, alphabet }
    }

    pub fn shift(&self) -> i64 {
        self.shift
    }

    pub fn set_shift(&mut self, shift: i64) {
        self.shift = shift;
    }

    fn apply(&self, text: &str, shift: i64) -> Result<String> {
        let len = self.alphabet.len() as i64;
        text.chars()
            .map(|c| {
                let index = self
                    .alphabet
                    .index_of(c)
                    .ok_or(CipherError::SymbolNotInAlphabet(c))?;
                let moved = (index as i64 + shift).rem_euclid(len) as usize;
                self.alphabet
                    .symbol(moved)
                    .ok_or(CipherError::SymbolNotInAlphabet(c))
            })
            .collect()
    }
}

impl Cipher for CaesarCipher {
    fn name(&self) -> &'static str {
        "caesar"
    }

    fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        self.apply(plaintext, self.shift)
    }

    fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        self.apply(ciphertext, -self.shift)
    }
}
