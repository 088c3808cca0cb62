//! Alphabets and empirical symbol frequencies.
//!
//! A sequence is a plain `&str` whose chars must all belong to an
//! [`Alphabet`]. Frequencies are always reported in alphabet order, so every
//! [`FrequencyVector`] over the same alphabet has the same dimensionality.

mod alphabet;
mod frequency;

pub use alphabet::Alphabet;
pub use frequency::{estimate_frequency, FrequencyVector, SymbolCounts};
