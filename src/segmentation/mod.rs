//! Recursive segmentation of symbolic sequences.
//!
//! This module splits a sequence into statistically homogeneous segments
//! following Grosse et al., *Analysis of symbolic sequences using the
//! Jensen-Shannon divergence*, Phys. Rev. E 65, 041905 (2002).

mod splitter;

pub use splitter::{split, Cut, CutDecision, RecursiveSplitter, Segment, SplitResult};
