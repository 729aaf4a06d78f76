use crate::error::{CipherError, Result};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "@#$%^&*(){}[]-_=+<>|\\`~";
const PUNCTUATION: &str = ".,!?'\";:/";
const WHITESPACE: &str = " \t\n\r";

/// Named symbol groups an alphabet is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetPreset {
    #[default]
    Lower,
    Upper,
    Numbers,
    Symbols,
    Punctuation,
    Whitespace,
}

impl AlphabetPreset {
    /// Symbols of this preset, in their canonical order
    pub fn symbols(&self) -> &'static str {
        match self {
            Self::Lower => LOWER,
            Self::Upper => UPPER,
            Self::Numbers => NUMBERS,
            Self::Symbols => SYMBOLS,
            Self::Punctuation => PUNCTUATION,
            Self::Whitespace => WHITESPACE,
        }
    }

    /// Parse a comma separated preset list such as `lower,upper,numbers`
    pub fn parse_list(s: &str) -> Result<Vec<Self>> {
        s.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl std::str::FromStr for AlphabetPreset {
    type Err = CipherError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lowercasealpha" | "lowercase" | "lower" => Ok(Self::Lower),
            "uppercasealpha" | "uppercase" | "upper" => Ok(Self::Upper),
            "numbers" | "nums" | "digits" => Ok(Self::Numbers),
            "symbols" | "syms" | "math" => Ok(Self::Symbols),
            "punctuation" | "punct" => Ok(Self::Punctuation),
            "whitespace" | "space" | "spaces" => Ok(Self::Whitespace),
            _ => Err(CipherError::UnsupportedAlgorithm(format!("alphabet: {}", s))),
        }
    }
}

/// Ordered set of unique symbols every cipher operates over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Build from arbitrary symbols, keeping the first occurrence of each
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for symbol in symbols {
            if !index.contains_key(&symbol) {
                index.insert(symbol, ordered.len());
                ordered.push(symbol);
            }
        }
        if ordered.is_empty() {
            return Err(CipherError::EmptyAlphabet);
        }
        Ok(Self {
            symbols: ordered,
            index,
        })
    }

    /// Concatenate presets in the given order
    pub fn from_presets(presets: &[AlphabetPreset]) -> Result<Self> {
        Self::new(presets.iter().flat_map(|p| p.symbols().chars()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Check that every symbol of `text` belongs to the alphabet
    pub fn validate(&self, text: &str) -> Result<()> {
        match text.chars().find(|c| !self.contains(*c)) {
            Some(stray) => Err(CipherError::SymbolNotInAlphabet(stray)),
            None => Ok(()),
        }
    }

    /// Draw one symbol uniformly at random
    pub fn random_symbol(&self, rng: &mut dyn RngCore) -> char {
        self.symbols[rng.gen_range(0..self.symbols.len())]
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: LOWER.chars().collect(),
            index: LOWER.chars().enumerate().map(|(i, c)| (c, i)).collect(),
        }
    }
}
