//! Shannon entropy in bits.

use crate::error::Result;
use crate::sequence::{estimate_frequency, Alphabet, FrequencyVector};

/// Shannon entropy of `p` in bits.
///
/// Zero-probability symbols contribute nothing.
pub fn entropy(p: &FrequencyVector) -> f64 {
    entropy_of_slice(p.as_slice())
}

/// Entropy of the empirical symbol distribution of `segment`.
pub fn entropy_of(alphabet: &Alphabet, segment: &str) -> Result<f64> {
    Ok(entropy(&estimate_frequency(alphabet, segment)?))
}

pub(crate) fn entropy_of_slice(p: &[f64]) -> f64 {
    let mut h = 0.0;
    for &pi in p {
        if pi > 0.0 {
            h -= pi * pi.log2();
        }
    }
    h
}
