//! Empirical symbol frequencies.

use crate::error::{JsdSegError, Result};
use crate::sequence::Alphabet;

/// Per-symbol probabilities of a segment, in alphabet order.
///
/// For any non-empty segment the entries are non-negative and sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyVector(Vec<f64>);

impl FrequencyVector {
    /// Uniform distribution over `k` symbols.
    pub fn uniform(k: usize) -> Self {
        Self(vec![1.0 / k as f64; k])
    }

    /// Normalizes integer counts by their total.
    ///
    /// Fails with [`JsdSegError::EmptySegment`] when the total is zero.
    pub fn from_counts(counts: &[u64]) -> Result<Self> {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Err(JsdSegError::EmptySegment);
        }
        let total = total as f64;
        Ok(Self(counts.iter().map(|&c| c as f64 / total).collect()))
    }

    /// Number of entries (alphabet size).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the vector has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }
}

/// Wraps raw probabilities without normalizing them.
///
/// The caller is responsible for passing a distribution.
impl From<Vec<f64>> for FrequencyVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Running per-symbol counts over an encoded segment.
///
/// The splitter keeps one of these for the prefix and one for the suffix of a
/// candidate cut and moves one symbol across per position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCounts {
    counts: Vec<u64>,
    total: u64,
}

impl SymbolCounts {
    /// All-zero counts for an alphabet of `k` symbols.
    pub fn new(k: usize) -> Self {
        Self {
            counts: vec![0; k],
            total: 0,
        }
    }

    /// Counts the alphabet indices in `symbols`.
    pub fn from_symbols(k: usize, symbols: &[usize]) -> Self {
        let mut counts = Self::new(k);
        for &s in symbols {
            counts.increment(s);
        }
        counts
    }

    /// Adds one occurrence of symbol `s`.
    #[inline]
    pub fn increment(&mut self, s: usize) {
        self.counts[s] += 1;
        self.total += 1;
    }

    /// Removes one occurrence of symbol `s`.
    #[inline]
    pub fn decrement(&mut self, s: usize) {
        debug_assert!(self.counts[s] > 0, "decrement below zero for symbol {}", s);
        self.counts[s] -= 1;
        self.total -= 1;
    }

    /// Total number of counted symbols.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Current counts as a frequency vector.
    pub fn frequencies(&self) -> Result<FrequencyVector> {
        FrequencyVector::from_counts(&self.counts)
    }
}

/// Estimates the symbol frequencies of `segment` over `alphabet`.
///
/// Every symbol is validated. Empty segments are rejected rather than
/// producing NaN entries.
pub fn estimate_frequency(alphabet: &Alphabet, segment: &str) -> Result<FrequencyVector> {
    let symbols = alphabet.encode(segment)?;
    SymbolCounts::from_symbols(alphabet.len(), &symbols).frequencies()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dna() -> Alphabet {
        "ACGT".parse().unwrap()
    }

    #[test]
    fn test_estimate_frequency() {
        let freq = estimate_frequency(&dna(), "AACG").unwrap();
        assert_eq!(freq.as_slice(), &[0.5, 0.25, 0.25, 0.0]);
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        for segment in ["A", "ACGT", "GGGTTA", "ACGTACGTTTTTGCA", "TCTCTCTCTCG"] {
            let freq = estimate_frequency(&dna(), segment).unwrap();
            let sum: f64 = freq.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum {} for {}", sum, segment);
        }
    }

    #[test]
    fn test_invalid_symbol() {
        let alphabet: Alphabet = "AC".parse().unwrap();
        assert!(matches!(
            estimate_frequency(&alphabet, "ACG"),
            Err(JsdSegError::InvalidSymbol { symbol: 'G', position: 2 })
        ));
    }

    #[test]
    fn test_empty_segment_rejected() {
        assert!(matches!(
            estimate_frequency(&dna(), ""),
            Err(JsdSegError::EmptySegment)
        ));
    }

    #[test]
    fn test_incremental_matches_full_count() {
        let alphabet = dna();
        let symbols = alphabet.encode("ACGTTGCAAC").unwrap();
        let mut prefix = SymbolCounts::new(4);
        let mut suffix = SymbolCounts::from_symbols(4, &symbols);

        for pos in 1..symbols.len() {
            let moved = symbols[pos - 1];
            prefix.increment(moved);
            suffix.decrement(moved);

            let expected_prefix = SymbolCounts::from_symbols(4, &symbols[..pos]);
            let expected_suffix = SymbolCounts::from_symbols(4, &symbols[pos..]);
            assert_eq!(prefix, expected_prefix);
            assert_eq!(suffix, expected_suffix);
            assert_eq!(
                prefix.frequencies().unwrap(),
                expected_prefix.frequencies().unwrap()
            );
        }
    }

    #[test]
    fn test_uniform() {
        let u = FrequencyVector::uniform(4);
        assert_eq!(u.len(), 4);
        assert!(u.iter().all(|&p| (p - 0.25).abs() < 1e-12));
    }
}
