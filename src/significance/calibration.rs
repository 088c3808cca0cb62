//! Calibration constants for the significance approximation.

use crate::error::{JsdSegError, Result};
use serde::{Deserialize, Serialize};

/// Default significance level a cut must exceed.
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 0.95;

/// Default minimum segment length considered for splitting.
pub const DEFAULT_MIN_SEGMENT_LENGTH: usize = 2;

/// Fitted (k, beta, a, b) values from Grosse et al., Phys. Rev. E 65,
/// 041905 (2002), Table 1.
const PRESETS: [(usize, f64, f64, f64); 3] = [
    (2, 0.80, 2.96, -7.88),
    (4, 0.80, 2.44, -6.15),
    (12, 0.85, 2.32, -4.32),
];

/// Scale and shape of the chi-squared approximation plus the stopping rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParameters {
    /// Scale factor applied to the divergence statistic.
    pub beta: f64,

    /// Slope of the effective sample size in ln(N).
    pub a: f64,

    /// Intercept of the effective sample size.
    pub b: f64,

    /// A cut is accepted when its significance is strictly above this.
    /// Default: 0.95.
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    /// Segments shorter than this are never split.
    /// Default: 2.
    #[serde(default = "default_min_segment_length")]
    pub min_segment_length: usize,
}

fn default_significance_threshold() -> f64 {
    DEFAULT_SIGNIFICANCE_THRESHOLD
}

fn default_min_segment_length() -> usize {
    DEFAULT_MIN_SEGMENT_LENGTH
}

impl CalibrationParameters {
    /// Builds parameters with the default threshold and minimum length.
    pub fn new(beta: f64, a: f64, b: f64) -> Self {
        Self {
            beta,
            a,
            b,
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
        }
    }

    /// Published preset for an alphabet of `alphabet_size` symbols.
    pub fn preset(alphabet_size: usize) -> Result<Self> {
        PRESETS
            .iter()
            .find(|(k, ..)| *k == alphabet_size)
            .map(|&(_, beta, a, b)| Self::new(beta, a, b))
            .ok_or(JsdSegError::UnsupportedAlphabetSize(alphabet_size))
    }

    /// Uses `explicit` when given, otherwise the preset for `alphabet_size`.
    pub fn resolve(alphabet_size: usize, explicit: Option<&Self>) -> Result<Self> {
        let params = match explicit {
            Some(params) => *params,
            None => Self::preset(alphabet_size)?,
        };
        params.validate()?;
        Ok(params)
    }

    /// Sets the significance threshold.
    pub fn with_threshold(mut self, significance_threshold: f64) -> Self {
        self.significance_threshold = significance_threshold;
        self
    }

    /// Sets the minimum segment length.
    pub fn with_min_segment_length(mut self, min_segment_length: usize) -> Self {
        self.min_segment_length = min_segment_length;
        self
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(JsdSegError::InvalidCalibration(format!(
                "beta must be positive and finite, got {}",
                self.beta
            )));
        }
        if !self.a.is_finite() || !self.b.is_finite() {
            return Err(JsdSegError::InvalidCalibration(format!(
                "a and b must be finite, got a={} b={}",
                self.a, self.b
            )));
        }
        if !(0.0..=1.0).contains(&self.significance_threshold) {
            return Err(JsdSegError::InvalidCalibration(format!(
                "significance threshold must be in [0, 1], got {}",
                self.significance_threshold
            )));
        }
        if self.min_segment_length == 0 {
            return Err(JsdSegError::InvalidCalibration(
                "min segment length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective number of independent cut positions for a segment of
    /// length `n`, a·ln(n) + b.
    ///
    /// Floored at zero: the fit goes negative for short segments, and a
    /// negative exponent would lift the score above one.
    pub fn effective_sample_size(&self, n: usize) -> f64 {
        (self.a * (n as f64).ln() + self.b).max(0.0)
    }
}
