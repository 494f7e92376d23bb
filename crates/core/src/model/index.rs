use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a deck or card as shown to the user.
///
/// Stored zero-based; parsed and displayed one-based.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Index(usize);

impl Index {
    #[must_use]
    pub fn from_zero_based(index: usize) -> Self {
        Self(index)
    }

    /// Returns `None` for zero, which has no one-based meaning.
    #[must_use]
    pub fn from_one_based(index: usize) -> Option<Self> {
        index.checked_sub(1).map(Self)
    }

    #[must_use]
    pub fn zero_based(&self) -> usize {
        self.0
    }

    #[must_use]
    pub fn one_based(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index({})", self.one_based())
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

// ─── FromStr ───────────────────────────────────────────────────────────────────

/// Error type for parsing an index from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndexError {
    raw: String,
}

impl ParseIndexError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ParseIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index must be a positive integer, got {:?}", self.raw)
    }
}

impl std::error::Error for ParseIndexError {}

impl FromStr for Index {
    type Err = ParseIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(Index::from_one_based)
            .ok_or_else(|| ParseIndexError {
                raw: trimmed.to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_from_str_is_one_based() {
        let index: Index = "3".parse().unwrap();
        assert_eq!(index.zero_based(), 2);
        assert_eq!(index.one_based(), 3);
        assert_eq!(index.to_string(), "3");
    }

    #[test]
    fn test_index_from_str_trims() {
        let index: Index = "  1 ".parse().unwrap();
        assert_eq!(index, Index::from_zero_based(0));
    }

    #[test]
    fn test_index_rejects_zero_and_negatives() {
        assert!("0".parse::<Index>().is_err());
        assert!("-1".parse::<Index>().is_err());
    }

    #[test]
    fn test_index_rejects_non_numbers() {
        let err = "abc".parse::<Index>().unwrap_err();
        assert_eq!(err.raw(), "abc");
        assert!("1 2".parse::<Index>().is_err());
        assert!("".parse::<Index>().is_err());
    }

    #[test]
    fn test_from_one_based_zero_is_none() {
        assert_eq!(Index::from_one_based(0), None);
        assert_eq!(Index::from_one_based(1), Some(Index::from_zero_based(0)));
    }
}
