//! # jsdseg - Jensen-Shannon Sequence Segmentation
//!
//! jsdseg splits a symbolic sequence (DNA, protein classes, any categorical
//! string over a small alphabet) into statistically homogeneous segments.
//!
//! ## Overview
//!
//! The method of Grosse et al. (Phys. Rev. E 65, 041905, 2002) is applied
//! recursively:
//!
//! 1. every cut of a segment is scored with the Jensen-Shannon divergence
//!    between the symbol frequencies of its two halves, weighted by their
//!    lengths;
//! 2. the cut of maximal divergence is tested against a chi-squared
//!    approximation of its null distribution;
//! 3. significant cuts split the segment and both halves are processed the
//!    same way, otherwise the segment is final.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsdseg::{Alphabet, CalibrationParameters, RecursiveSplitter};
//!
//! let alphabet: Alphabet = "AC".parse()?;
//! let splitter = RecursiveSplitter::new(alphabet, CalibrationParameters::preset(2)?)?;
//!
//! let segments = splitter.split("AAAAACCCCC")?;
//! assert_eq!(segments, vec!["AAAAA", "CCCCC"]);
//! # Ok::<(), jsdseg::JsdSegError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`sequence`] - Alphabets and symbol frequency estimation
//! - [`information`] - Shannon entropy and weighted Jensen-Shannon divergence
//! - [`significance`] - Chi-squared significance test and calibration presets
//! - [`segmentation`] - The recursive splitter
//! - [`config`] - JSON configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod information;
pub mod segmentation;
pub mod sequence;
pub mod significance;

// Re-export commonly used types
pub use config::Config;
pub use error::{JsdSegError, Result};
pub use information::{divergence, divergence_at, entropy, entropy_of};
pub use segmentation::{split, Cut, CutDecision, RecursiveSplitter, Segment, SplitResult};
pub use sequence::{estimate_frequency, Alphabet, FrequencyVector, SymbolCounts};
pub use significance::{significance, CalibrationParameters, SignificanceTest};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
