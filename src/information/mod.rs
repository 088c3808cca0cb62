//! Information-theoretic measures over symbol frequency vectors.
//!
//! ## Shannon entropy
//!
//!   H(p) = -Σᵢ pᵢ log₂(pᵢ)      (0 · log₂ 0 = 0)
//!
//! ## Weighted Jensen-Shannon divergence
//!
//!   JSD(p, q) = H(w_p·p + w_q·q) - w_p·H(p) - w_q·H(q)
//!
//! with w_p + w_q = 1. When splitting a sequence the weights are the relative
//! lengths of the two halves, so a short but very different prefix does not
//! dominate the cut selection.

mod divergence;
mod entropy;

pub use divergence::{divergence, divergence_at};
pub use entropy::{entropy, entropy_of};
