use crate::error::{CipherError, Result};
use serde::{Deserialize, Serialize};

/// Sort direction used to derive the column read-out order from the key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RankDirection {
    #[default]
    Ascending,
    Descending,
}

impl std::str::FromStr for RankDirection {
    type Err = CipherError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            _ => Err(CipherError::UnsupportedAlgorithm(format!("direction: {}", s))),
        }
    }
}

/// Raw key input before sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Text(String),
    /// Decimal digits of the number become the key symbols
    Number(u64),
    /// Each code point becomes one key symbol
    CodePoints(Vec<u32>),
}

impl KeyMaterial {
    fn into_symbols(self) -> Result<Vec<char>> {
        match self {
            Self::Text(text) => Ok(text.chars().collect()),
            Self::Number(n) => Ok(n.to_string().chars().collect()),
            Self::CodePoints(points) => points
                .into_iter()
                .map(|p| {
                    char::from_u32(p)
                        .ok_or_else(|| CipherError::InvalidKey(format!("code point {:#x}", p)))
                })
                .collect(),
        }
    }
}

impl From<&str> for KeyMaterial {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for KeyMaterial {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u64> for KeyMaterial {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

/// Column permutation of a transposition key
///
/// `source(c)` is the original column read at permuted position `c`;
/// `target(j)` is where original column `j` lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    order: Vec<usize>,
    inverse: Vec<usize>,
}

impl ColumnOrder {
    /// Wrap an explicit order, rejecting anything that is not a permutation of `0..len`
    pub fn new(order: Vec<usize>) -> Result<Self> {
        if order.is_empty() {
            return Err(CipherError::InvalidKey("column order is empty".into()));
        }
        let mut inverse = vec![usize::MAX; order.len()];
        for (position, &column) in order.iter().enumerate() {
            if column >= order.len() || inverse[column] != usize::MAX {
                return Err(CipherError::InvalidKey(format!(
                    "{:?} is not a permutation",
                    order
                )));
            }
            inverse[column] = position;
        }
        Ok(Self { order, inverse })
    }

    pub fn identity(cols: usize) -> Result<Self> {
        Self::new((0..cols).collect())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn source(&self, position: usize) -> usize {
        self.order[position]
    }

    pub fn target(&self, column: usize) -> usize {
        self.inverse[column]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }
}

/// A derived transposition key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    columns: Vec<char>,
    rank: Vec<char>,
    order: ColumnOrder,
}

impl Key {
    /// Derive columns, rank and column order from raw key material
    pub fn build(
        material: impl Into<KeyMaterial>,
        sanitize: bool,
        direction: RankDirection,
    ) -> Result<Self> {
        let mut symbols = material.into().into_symbols()?;
        if sanitize {
            symbols = sanitize_symbols(&symbols);
        }

        let mut columns: Vec<char> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if !columns.contains(&symbol) {
                columns.push(symbol);
            }
        }
        if columns.is_empty() {
            return Err(CipherError::InvalidKey("key is empty".into()));
        }

        let mut rank = columns.clone();
        match direction {
            RankDirection::Ascending => rank.sort(),
            RankDirection::Descending => rank.sort_by(|a, b| b.cmp(a)),
        }

        let order = rank
            .iter()
            .map(|symbol| columns.iter().position(|c| c == symbol))
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| CipherError::InvalidKey("rank is not a permutation".into()))?;

        Ok(Self {
            columns,
            rank,
            order: ColumnOrder::new(order)?,
        })
    }

    /// Key with an explicit column order; columns carry positional labels `A`, `B`, ...
    pub fn from_order(order: ColumnOrder) -> Result<Self> {
        let columns = (0..order.len())
            .map(|i| {
                u32::try_from(i)
                    .ok()
                    .and_then(|i| char::from_u32('A' as u32 + i))
                    .ok_or_else(|| CipherError::InvalidKey(format!("{} columns", order.len())))
            })
            .collect::<Result<Vec<char>>>()?;
        let rank = order.as_slice().iter().map(|&c| columns[c]).collect();
        Ok(Self {
            columns,
            rank,
            order,
        })
    }

    pub fn columns(&self) -> &[char] {
        &self.columns
    }

    pub fn rank(&self) -> &[char] {
        &self.rank
    }

    pub fn order(&self) -> &ColumnOrder {
        &self.order
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }
}

/// Lowercase and drop whitespace and control characters
fn sanitize_symbols(symbols: &[char]) -> Vec<char> {
    symbols
        .iter()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let key = Key::build("2123", false, RankDirection::Ascending).unwrap();
        assert_eq!(key.columns(), &['2', '1', '3']);
        assert_eq!(key.rank(), &['1', '2', '3']);
        assert_eq!(key.cols(), 3);
        assert_eq!(key.order().as_slice(), &[1, 0, 2]);
    }

    #[test]
    fn test_descending_rank() {
        let key = Key::build("zebra", false, RankDirection::Descending).unwrap();
        assert_eq!(key.rank(), &['z', 'r', 'e', 'b', 'a']);
        assert_eq!(key.order().as_slice(), &[0, 3, 1, 2, 4]);
    }

    #[test]
    fn test_sanitize_folds_case_and_strips_whitespace() {
        let key = Key::build("Ze Bra\t\n", true, RankDirection::Ascending).unwrap();
        assert_eq!(key.columns(), &['z', 'e', 'b', 'r', 'a']);

        let raw = Key::build("Ze Bra", false, RankDirection::Ascending).unwrap();
        assert_eq!(raw.columns(), &['Z', 'e', ' ', 'B', 'r', 'a']);
        assert_eq!(raw.rank()[0], ' ');
    }

    #[test]
    fn test_repeated_symbols_collapse_to_one_column() {
        let key = Key::build(111u64, false, RankDirection::Ascending).unwrap();
        assert_eq!(key.cols(), 1);
        assert_eq!(key.order().as_slice(), &[0]);
    }

    #[test]
    fn test_code_point_material() {
        let key = Key::build(
            KeyMaterial::CodePoints(vec![0x63, 0x61, 0x62]),
            false,
            RankDirection::Ascending,
        )
        .unwrap();
        assert_eq!(key.columns(), &['c', 'a', 'b']);

        let bad = Key::build(
            KeyMaterial::CodePoints(vec![0xD800]),
            false,
            RankDirection::Ascending,
        );
        assert!(matches!(bad, Err(CipherError::InvalidKey(_))));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(Key::build("", false, RankDirection::Ascending).is_err());
        assert!(Key::build(" \t\r\n", true, RankDirection::Ascending).is_err());
        // Unsanitized whitespace is a valid column
        assert_eq!(Key::build(" ", false, RankDirection::Ascending).unwrap().cols(), 1);
    }

    #[test]
    fn test_column_order_rejects_non_permutations() {
        assert!(ColumnOrder::new(vec![]).is_err());
        assert!(ColumnOrder::new(vec![0, 0]).is_err());
        assert!(ColumnOrder::new(vec![0, 2]).is_err());
        assert!(ColumnOrder::new(vec![2, 0, 1]).is_ok());
    }

    #[test]
    fn test_from_order_labels_columns() {
        let key = Key::from_order(ColumnOrder::new(vec![2, 0, 1]).unwrap()).unwrap();
        assert_eq!(key.columns(), &['A', 'B', 'C']);
        assert_eq!(key.rank(), &['C', 'A', 'B']);
        assert_eq!(key.order().as_slice(), &[2, 0, 1]);
    }

    proptest! {
        #[test]
        fn prop_order_composes_with_inverse(raw in "\\PC{1,24}", descending in any::<bool>()) {
            let direction = if descending { RankDirection::Descending } else { RankDirection::Ascending };
            let key = Key::build(raw.as_str(), false, direction).unwrap();
            let order = key.order();
            prop_assert_eq!(order.len(), key.cols());
            for c in 0..order.len() {
                prop_assert_eq!(order.target(order.source(c)), c);
                prop_assert_eq!(order.source(order.target(c)), c);
                prop_assert_eq!(key.rank()[c], key.columns()[order.source(c)]);
            }
        }
    }
}
