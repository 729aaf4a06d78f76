use crate::alphabet::{Alphabet, AlphabetPreset};
use crate::cipher::{CaesarCipher, CipherKind, ColumnarCipher, ScrambleCipher};
use crate::error::{CipherError, Result};
use crate::key::{Key, RankDirection};
use crate::transpose::PadPolicy;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::path::Path;

/// Current profile format version
pub const PROFILE_VERSION: u32 = 1;

/// Cipher algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CipherAlgorithm {
    #[default]
    Columnar,
    Caesar,
    Scramble,
}

impl std::str::FromStr for CipherAlgorithm {
    type Err = CipherError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "columnar" | "coltrans" | "transposition" => Ok(Self::Columnar),
            "caesar" | "shift" => Ok(Self::Caesar),
            "scramble" | "substitution" => Ok(Self::Scramble),
            _ => Err(CipherError::UnsupportedAlgorithm(format!("cipher: {}", s))),
        }
    }
}

/// Serialized cipher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CipherProfile {
    /// Format version
    pub version: u32,
    pub cipher: CipherAlgorithm,
    /// Presets concatenated, in order, into the working alphabet
    pub alphabet: Vec<AlphabetPreset>,
    /// Transposition key, Caesar shift, or scramble passphrase
    pub key: String,
    /// Case-fold and strip whitespace from a transposition key
    pub sanitize: bool,
    pub direction: RankDirection,
    pub padding: PadPolicy,
    /// Seed for random padding
    pub seed: Option<u64>,
}

impl Default for CipherProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            cipher: CipherAlgorithm::default(),
            alphabet: vec![AlphabetPreset::Lower],
            key: String::new(),
            sanitize: false,
            direction: RankDirection::default(),
            padding: PadPolicy::default(),
            seed: None,
        }
    }
}

impl CipherProfile {
    /// Serialize profile to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Deserialize profile from JSON bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let profile = Self::from_bytes(&data)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != PROFILE_VERSION {
            return Err(CipherError::InvalidProfile(format!(
                "unsupported version {}",
                self.version
            )));
        }
        if self.key.is_empty() {
            return Err(CipherError::InvalidProfile("key is empty".into()));
        }
        if self.alphabet.is_empty() {
            return Err(CipherError::InvalidProfile("alphabet is empty".into()));
        }
        if self.cipher == CipherAlgorithm::Caesar {
            self.caesar_shift()?;
        }
        Ok(())
    }

    /// SHA3-256 of the serialized profile, hex encoded
    pub fn fingerprint(&self) -> Result<String> {
        let digest = Sha3_256::digest(self.to_bytes()?);
        Ok(hex::encode(digest))
    }

    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::from_presets(&self.alphabet)
    }

    fn caesar_shift(&self) -> Result<i64> {
        self.key.trim().parse().map_err(|_| {
            CipherError::InvalidProfile(format!("caesar key {:?} is not an integer", self.key))
        })
    }

    /// Instantiate the configured cipher
    pub fn build(&self) -> Result<CipherKind> {
        self.validate()?;
        let alphabet = self.alphabet()?;
        Ok(match self.cipher {
            CipherAlgorithm::Columnar => {
                let key = Key::build(self.key.as_str(), self.sanitize, self.direction)?;
                CipherKind::Columnar(ColumnarCipher::new(key, alphabet, self.padding, self.seed)?)
            }
            CipherAlgorithm::Caesar => {
                CipherKind::Caesar(CaesarCipher::new(self.caesar_shift()?, alphabet))
            }
            CipherAlgorithm::Scramble => {
                CipherKind::Scramble(ScrambleCipher::from_passphrase(&self.key, alphabet))
            }
        })
    }
}
