use crate::alphabet::Alphabet;
use crate::analysis::ranker::{crack, CrackOptions, CrackOutcome};
use crate::analysis::reference::ReferenceTable;
use crate::cipher::Cipher;
use crate::error::{CipherError, Result};
use crate::key::Key;
use crate::transpose::{self, PadPolicy, Padding};
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

/// Columnar transposition with a fixed key and pad policy
#[derive(Debug, Clone)]
pub struct ColumnarCipher {
    key: Key,
    alphabet: Alphabet,
    padding: PadPolicy,
    rng: StdRng,
    crack_options: CrackOptions,
}

impl ColumnarCipher {
    /// `seed` makes random padding reproducible; without it the generator
    /// is seeded from the operating system
    pub fn new(key: Key, alphabet: Alphabet, padding: PadPolicy, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(OsRng).map_err(|_| CipherError::RngUnavailable)?,
        };
        Ok(Self {
            key,
            alphabet,
            padding,
            rng,
            crack_options: CrackOptions::default(),
        })
    }

    pub fn with_crack_options(mut self, options: CrackOptions) -> Self {
        self.crack_options = options;
        self
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn pad_policy(&self) -> PadPolicy {
        self.padding
    }
}

impl Cipher for ColumnarCipher {
    fn name(&self) -> &'static str {
        "columnar"
    }

    fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        let mut padding = match self.padding {
            PadPolicy::None => Padding::None,
            PadPolicy::Random => Padding::Random {
                alphabet: &self.alphabet,
                rng: &mut self.rng,
            },
        };
        transpose::encrypt(plaintext, &self.key, &mut padding)
    }

    fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        let mut padding = match self.padding {
            PadPolicy::None => Padding::None,
            PadPolicy::Random => Padding::Random {
                alphabet: &self.alphabet,
                rng: &mut self.rng,
            },
        };
        transpose::decrypt(ciphertext, &self.key, &mut padding)
    }

    fn crack(&self, ciphertext: &str, reference: &ReferenceTable) -> Result<Option<CrackOutcome>> {
        crack(ciphertext, reference, &self.crack_options).map(Some)
    }
}
