use crate::alphabet::AlphabetPreset;
use crate::error::Result;
use crate::key::RankDirection;
use crate::profile::{CipherAlgorithm, CipherProfile};
use crate::transpose::PadPolicy;
use std::path::PathBuf;

/// Cipher selection shared by the encrypt, decrypt and profile commands.
/// Explicit fields override the values loaded from `profile`.
#[derive(Debug, Clone, Default)]
pub struct CipherOptions {
    pub profile: Option<PathBuf>,
    pub cipher: Option<CipherAlgorithm>,
    pub key: Option<String>,
    pub alphabet: Option<Vec<AlphabetPreset>>,
    pub descending: bool,
    pub strict: bool,
    pub padding: Option<PadPolicy>,
    pub seed: Option<u64>,
}

impl CipherOptions {
    /// Merge the profile file (if any) with the explicit overrides
    pub fn resolve(&self) -> Result<CipherProfile> {
        let mut profile = match &self.profile {
            Some(path) => CipherProfile::load(path)?,
            None => CipherProfile::default(),
        };

        if let Some(cipher) = self.cipher {
            profile.cipher = cipher;
        }
        if let Some(key) = &self.key {
            profile.key = key.clone();
        }
        if let Some(alphabet) = &self.alphabet {
            profile.alphabet = alphabet.clone();
        }
        if self.descending {
            profile.direction = RankDirection::Descending;
        }
        if self.strict {
            profile.sanitize = true;
        }
        if let Some(padding) = self.padding {
            profile.padding = padding;
        }
        if self.seed.is_some() {
            profile.seed = self.seed;
        }

        profile.validate()?;
        Ok(profile)
    }
}
