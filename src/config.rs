//! Configuration for Jensen-Shannon segmentation.

use crate::error::{JsdSegError, Result};
use crate::sequence::Alphabet;
use crate::significance::CalibrationParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Symbols of the alphabet in order, e.g. "ACGT".
    /// Default: None (must be given on the command line).
    pub alphabet: Option<String>,

    /// Explicit calibration constants.
    /// Default: None (use the published preset for the alphabet size).
    pub calibration: Option<CalibrationParameters>,

    /// Maximum depth of the segmentation tree.
    /// Default: None (unbounded).
    pub max_depth: Option<usize>,
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Writes configuration to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The configured alphabet.
    pub fn alphabet(&self) -> Result<Alphabet> {
        self.alphabet
            .as_deref()
            .ok_or_else(|| JsdSegError::Config("no alphabet configured".to_string()))?
            .parse()
    }

    /// Calibration for an alphabet of `alphabet_size` symbols.
    pub fn calibration_for(&self, alphabet_size: usize) -> Result<CalibrationParameters> {
        CalibrationParameters::resolve(alphabet_size, self.calibration.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.alphabet.is_none());
        assert!(config.calibration.is_none());
        assert!(matches!(config.alphabet(), Err(JsdSegError::Config(_))));
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(r#"{"alphabet": "ACGT"}"#).unwrap();
        assert_eq!(config.alphabet().unwrap().len(), 4);
        let params = config.calibration_for(4).unwrap();
        assert_eq!(params, CalibrationParameters::preset(4).unwrap());
    }

    #[test]
    fn test_explicit_calibration() {
        let config = Config::from_json(
            r#"{
                "alphabet": "ABC",
                "calibration": {"beta": 0.8, "a": 2.5, "b": -6.0, "min_segment_length": 10},
                "max_depth": 4
            }"#,
        )
        .unwrap();
        let params = config.calibration_for(3).unwrap();
        assert_eq!(params.a, 2.5);
        assert_eq!(params.min_segment_length, 10);
        assert_eq!(params.significance_threshold, 0.95);
        assert_eq!(config.max_depth, Some(4));
    }

    #[test]
    fn test_missing_preset() {
        let config = Config::from_json(r#"{"alphabet": "ABC"}"#).unwrap();
        assert!(matches!(
            config.calibration_for(3),
            Err(JsdSegError::UnsupportedAlphabetSize(3))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Config::from_json("{alphabet: "),
            Err(JsdSegError::Json(_))
        ));
    }
}
