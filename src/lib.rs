//! Coltrans - Columnar Transposition Cipher and Cryptanalysis
//!
//! A keyed columnar transposition engine together with the statistical
//! tools used to attack it without the key.
//!
//! ## Transposition
//!
//! ```text
//! Key → dedup columns → rank (sorted) → column order
//! Plaintext → row-major grid → permute columns → column-major read → Ciphertext
//! ```
//!
//! Empty cells of the last row are either omitted or filled with random
//! alphabet symbols, depending on the [`PadPolicy`].
//!
//! ## Cryptanalysis
//!
//! ```text
//! Ciphertext → key length (index of coincidence) → every column order
//!            → decrypt → bigram profile → score vs reference → best plaintext
//! ```
//!
//! ## Example
//!
//! ```
//! use coltrans::key::{Key, RankDirection};
//! use coltrans::transpose::{decrypt, encrypt, Padding};
//!
//! let key = Key::build("zebra", true, RankDirection::Ascending).unwrap();
//! let ciphertext = encrypt("attackatdawn", &key, &mut Padding::None).unwrap();
//! assert_eq!(decrypt(&ciphertext, &key, &mut Padding::None).unwrap(), "attackatdawn");
//! ```

pub mod alphabet;
pub mod analysis;
pub mod cipher;
pub mod cli;
pub mod error;
pub mod key;
pub mod profile;
pub mod transpose;

pub use alphabet::{Alphabet, AlphabetPreset};
pub use cipher::{Cipher, CipherKind};
pub use error::{CipherError, Result};
pub use key::{ColumnOrder, Key, KeyMaterial, RankDirection};
pub use profile::{CipherAlgorithm, CipherProfile};
pub use transpose::{PadPolicy, Padding};
