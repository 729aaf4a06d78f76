//! Cipher variants behind a common capability interface.

pub mod caesar;
pub mod columnar;
pub mod scramble;

pub use caesar::CaesarCipher;
pub use columnar::ColumnarCipher;
pub use scramble::ScrambleCipher;

use crate::analysis::ranker::CrackOutcome;
use crate::analysis::reference::ReferenceTable;
use crate::error::Result;

pub trait Cipher {
    fn name(&self) -> &'static str;

    fn encrypt(&mut self, plaintext: &str) -> Result<String>;

    fn decrypt(&mut self, ciphertext: &str) -> Result<String>;

    /// Attempt recovery without the key; `None` when the variant has no attack
    fn crack(&self, _ciphertext: &str, _reference: &ReferenceTable) -> Result<Option<CrackOutcome>> {
        Ok(None)
    }
}

/// Closed set of supported ciphers
#[derive(Debug, Clone)]
pub enum CipherKind {
    Columnar(ColumnarCipher),
    Caesar(CaesarCipher),
    Scramble(ScrambleCipher),
}

impl Cipher for CipherKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Columnar(c) => c.name(),
            Self::Caesar(c) => c.name(),
            Self::Scramble(c) => c.name(),
        }
    }

    fn encrypt(&mut self, plaintext: &str) -> Result<String> {
        match self {
            Self::Columnar(c) => c.encrypt(plaintext),
            Self::Caesar(c) => c.encrypt(plaintext),
            Self::Scramble(c) => c.encrypt(plaintext),
        }
    }

    fn decrypt(&mut self, ciphertext: &str) -> Result<String> {
        match self {
            Self::Columnar(c) => c.decrypt(ciphertext),
            Self::Caesar(c) => c.decrypt(ciphertext),
            Self::Scramble(c) => c.decrypt(ciphertext),
        }
    }

    fn crack(&self, ciphertext: &str, reference: &ReferenceTable) -> Result<Option<CrackOutcome>> {
        match self {
            Self::Columnar(c) => c.crack(ciphertext, reference),
            Self::Caesar(c) => c.crack(ciphertext, reference),
            Self::Scramble(c) => c.crack(ciphertext, reference),
        }
    }
}
