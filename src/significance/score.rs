//! Significance of a maximal cut.

use crate::error::{JsdSegError, Result};
use crate::significance::CalibrationParameters;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::f64::consts::LN_2;

/// Significance gate for one alphabet size and calibration.
#[derive(Debug, Clone, Copy)]
pub struct SignificanceTest {
    chi_squared: ChiSquared,
    params: CalibrationParameters,
}

impl SignificanceTest {
    /// Creates the test for an alphabet of `alphabet_size` symbols, using a
    /// chi-squared distribution with `alphabet_size - 1` degrees of freedom.
    pub fn new(alphabet_size: usize, params: CalibrationParameters) -> Result<Self> {
        if alphabet_size < 2 {
            return Err(JsdSegError::InvalidAlphabet(format!(
                "need at least 2 symbols for a significance test, got {}",
                alphabet_size
            )));
        }
        let chi_squared = ChiSquared::new((alphabet_size - 1) as f64).map_err(|e| {
            JsdSegError::InvalidAlphabet(format!(
                "no chi-squared distribution for {} symbols: {}",
                alphabet_size, e
            ))
        })?;

        Ok(Self {
            chi_squared,
            params,
        })
    }

    /// Calibration in use.
    pub fn params(&self) -> &CalibrationParameters {
        &self.params
    }

    /// Significance in [0, 1] of the maximal divergence of a segment of
    /// length `n`.
    ///
    /// A missing or zero divergence means no usable cut and scores 0.
    pub fn score(&self, max_divergence: Option<f64>, n: usize) -> f64 {
        let divergence = match max_divergence {
            Some(d) if d > 0.0 => d,
            _ => return 0.0,
        };
        if n < 2 {
            return 0.0;
        }

        let statistic = n as f64 * LN_2 * self.params.beta * divergence;
        let n_eff = self.params.effective_sample_size(n);
        self.chi_squared.cdf(statistic).powf(n_eff)
    }

    /// Returns true if `score` clears the significance threshold.
    #[inline]
    pub fn is_significant(&self, score: f64) -> bool {
        score > self.params.significance_threshold
    }
}

/// Significance of `max_divergence` for a segment of length `n` over an
/// alphabet of `alphabet_size` symbols.
pub fn significance(
    max_divergence: Option<f64>,
    n: usize,
    alphabet_size: usize,
    params: &CalibrationParameters,
) -> Result<f64> {
    Ok(SignificanceTest::new(alphabet_size, *params)?.score(max_divergence, n))
}
