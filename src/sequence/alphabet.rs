//! Ordered symbol alphabets.

use crate::error::{JsdSegError, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An ordered set of distinct symbols.
///
/// The order fixes the layout of every frequency vector computed over this
/// alphabet. Alphabets are immutable once built and cheap to share by
/// reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from a list of symbols.
    ///
    /// Fails if fewer than two symbols are given or a symbol repeats.
    pub fn new(symbols: Vec<char>) -> Result<Self> {
        if symbols.len() < 2 {
            return Err(JsdSegError::InvalidAlphabet(format!(
                "need at least 2 symbols, got {}",
                symbols.len()
            )));
        }

        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &symbol) in symbols.iter().enumerate() {
            if index.insert(symbol, i).is_some() {
                return Err(JsdSegError::InvalidAlphabet(format!(
                    "duplicate symbol {:?}",
                    symbol
                )));
            }
        }

        Ok(Self { symbols, index })
    }

    /// Number of symbols (k).
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; an alphabet holds at least two symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in alphabet order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Position of `symbol` in the alphabet.
    #[inline]
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Maps every char of `sequence` to its alphabet index.
    ///
    /// Every symbol is checked; the first unknown one is reported with its
    /// char offset.
    pub fn encode(&self, sequence: &str) -> Result<Vec<usize>> {
        sequence
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                self.index_of(symbol)
                    .ok_or(JsdSegError::InvalidSymbol { symbol, position })
            })
            .collect()
    }
}

impl FromStr for Alphabet {
    type Err = JsdSegError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.chars().collect())
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
