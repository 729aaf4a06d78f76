use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Length mismatch: {0}")]
    LengthMismatch(String),

    #[error("Text too short: {len} symbols, need at least {min}")]
    TextTooShort { len: usize, min: usize },

    #[error("Statistic undefined for a sample of {len} symbols")]
    UndefinedStatistic { len: usize },

    #[error("Alphabet is empty")]
    EmptyAlphabet,

    #[error("Symbol {0:?} is not in the alphabet")]
    SymbolNotInAlphabet(char),

    #[error("Key length {key_length} exceeds exhaustive search limit {limit}; set a candidate budget")]
    SearchTooLarge { key_length: usize, limit: usize },

    #[error("Random padding requested without a random source")]
    RngUnavailable,

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

pub type Result<T> = std::result::Result<T, CipherError>;
