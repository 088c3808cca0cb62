//! Statistical significance of a maximal Jensen-Shannon cut.
//!
//! For a segment of length N over an alphabet of k symbols with maximal
//! divergence D_max, the score is
//!
//!   NEff = a·ln(N) + b
//!   S    = CDF_χ²(k-1)(N · ln 2 · β · D_max) ^ NEff
//!
//! where (β, a, b) are the calibration constants fitted by Grosse et al.
//! (2002). A cut is accepted when S exceeds the significance threshold.
//! The chi-squared CDF comes from `statrs`.

mod calibration;
mod score;

pub use calibration::{
    CalibrationParameters, DEFAULT_MIN_SEGMENT_LENGTH, DEFAULT_SIGNIFICANCE_THRESHOLD,
};
pub use score::{significance, SignificanceTest};
