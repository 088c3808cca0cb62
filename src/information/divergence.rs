//! Weighted Jensen-Shannon divergence.

use crate::error::{JsdSegError, Result};
use crate::information::entropy::entropy_of_slice;
use crate::sequence::{Alphabet, FrequencyVector, SymbolCounts};

/// Weighted Jensen-Shannon divergence between `p` and `q`, in bits.
///
/// `weight_p` and `weight_q` must be non-negative and sum to 1, and both
/// vectors must come from the same alphabet.
pub fn divergence(p: &FrequencyVector, q: &FrequencyVector, weight_p: f64, weight_q: f64) -> f64 {
    debug_assert_eq!(p.len(), q.len(), "frequency vectors differ in dimension");

    let mixture: Vec<f64> = p
        .iter()
        .zip(q.iter())
        .map(|(&pi, &qi)| weight_p * pi + weight_q * qi)
        .collect();

    let jsd = entropy_of_slice(&mixture)
        - weight_p * entropy_of_slice(p.as_slice())
        - weight_q * entropy_of_slice(q.as_slice());

    // Rounding can leave a tiny negative residue for identical inputs.
    jsd.max(0.0)
}

/// Divergence of the cut of `sequence` at char offset `position`.
///
/// The halves are weighted by their relative lengths. `position` must leave
/// both halves non-empty.
pub fn divergence_at(alphabet: &Alphabet, sequence: &str, position: usize) -> Result<f64> {
    let symbols = alphabet.encode(sequence)?;
    let length = symbols.len();
    if position == 0 || position >= length {
        return Err(JsdSegError::InvalidPosition { position, length });
    }

    let k = alphabet.len();
    let prefix = SymbolCounts::from_symbols(k, &symbols[..position]).frequencies()?;
    let suffix = SymbolCounts::from_symbols(k, &symbols[position..]).frequencies()?;
    let n = length as f64;

    Ok(divergence(
        &prefix,
        &suffix,
        position as f64 / n,
        (length - position) as f64 / n,
    ))
}
