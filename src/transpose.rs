//! Columnar transposition over a row-major grid.
//!
//! Encryption fills a `rows × cols` grid row by row, reorders the columns
//! into key-rank order and reads the result column by column. Decryption
//! rebuilds the permuted grid from the column-major stream and undoes the
//! column permutation. Cells past the end of the text are empty; a
//! [`Padding`] decides whether they are omitted or filled.

use crate::alphabet::Alphabet;
use crate::error::{CipherError, Result};
use crate::key::{ColumnOrder, Key};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Serializable choice of what happens to empty grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PadPolicy {
    #[default]
    None,
    Random,
}

impl std::str::FromStr for PadPolicy {
    type Err = CipherError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "omit" => Ok(Self::None),
            "random" | "rand" => Ok(Self::Random),
            _ => Err(CipherError::UnsupportedAlgorithm(format!("padding: {}", s))),
        }
    }
}

/// Padding applied while reading a grid
pub enum Padding<'a> {
    /// Empty cells are skipped
    None,
    /// Empty cells become a uniformly random alphabet symbol
    Random {
        alphabet: &'a Alphabet,
        rng: &'a mut dyn RngCore,
    },
}

impl Padding<'_> {
    fn fill(&mut self) -> Option<char> {
        match self {
            Padding::None => None,
            Padding::Random { alphabet, rng } => Some(alphabet.random_symbol(&mut **rng)),
        }
    }
}

/// Row-major grid of optional symbols
#[derive(Debug, Clone)]
struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    fn from_rows(symbols: &[char], cols: usize) -> Self {
        let rows = row_count(symbols.len(), cols);
        let mut grid = Self::empty(rows, cols);
        for (i, &symbol) in symbols.iter().enumerate() {
            grid.cells[i] = Some(symbol);
        }
        grid
    }

    fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, symbol: Option<char>) {
        self.cells[row * self.cols + col] = symbol;
    }

    /// New grid whose column `c` is this grid's column `pick(c)`
    fn permute_columns(&self, pick: impl Fn(usize) -> usize) -> Self {
        let mut permuted = Self::empty(self.rows, self.cols);
        for c in 0..self.cols {
            let from = pick(c);
            for r in 0..self.rows {
                permuted.set(r, c, self.get(r, from));
            }
        }
        permuted
    }

    fn read_rows(&self, padding: &mut Padding<'_>) -> String {
        let mut out = String::with_capacity(self.cells.len());
        for cell in &self.cells {
            if let Some(symbol) = cell.or_else(|| padding.fill()) {
                out.push(symbol);
            }
        }
        out
    }

    fn read_columns(&self, padding: &mut Padding<'_>) -> String {
        let mut out = String::with_capacity(self.cells.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                if let Some(symbol) = self.get(r, c).or_else(|| padding.fill()) {
                    out.push(symbol);
                }
            }
        }
        out
    }
}

fn row_count(len: usize, cols: usize) -> usize {
    (len + cols - 1) / cols
}

fn check_columns(key: &Key) -> Result<usize> {
    match key.cols() {
        0 => Err(CipherError::LengthMismatch("key has no columns".into())),
        cols => Ok(cols),
    }
}

/// Encrypt `plaintext` with a columnar transposition
pub fn encrypt(plaintext: &str, key: &Key, padding: &mut Padding<'_>) -> Result<String> {
    let cols = check_columns(key)?;
    let symbols: Vec<char> = plaintext.chars().collect();
    let order = key.order();

    let grid = Grid::from_rows(&symbols, cols);
    let ordered = grid.permute_columns(|c| order.source(c));
    Ok(ordered.read_columns(padding))
}

/// Decrypt `ciphertext`, the structural inverse of [`encrypt`]
pub fn decrypt(ciphertext: &str, key: &Key, padding: &mut Padding<'_>) -> Result<String> {
    let cols = check_columns(key)?;
    let symbols: Vec<char> = ciphertext.chars().collect();
    let order = key.order();

    let ordered = fill_columns(&symbols, cols, order);
    let grid = ordered.permute_columns(|c| order.target(c));
    Ok(grid.read_rows(padding))
}

/// Rebuild the permuted grid from a column-major stream.
///
/// Unpadded ciphertext leaves the trailing cells of the last row empty, so
/// permuted columns whose source column falls past the filled part of that
/// row are one symbol shorter.
fn fill_columns(symbols: &[char], cols: usize, order: &ColumnOrder) -> Grid {
    let rows = row_count(symbols.len(), cols);
    let mut grid = Grid::empty(rows, cols);
    if rows == 0 {
        return grid;
    }
    let filled_last_row = symbols.len() - (rows - 1) * cols;

    let mut stream = symbols.iter().copied();
    for c in 0..cols {
        let height = if order.source(c) < filled_last_row {
            rows
        } else {
            rows - 1
        };
        for r in 0..height {
            grid.set(r, c, stream.next());
        }
    }
    grid
}
