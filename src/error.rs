//! Error types for Jensen-Shannon segmentation.

use thiserror::Error;

/// The main error type for jsdseg operations.
#[derive(Error, Debug)]
pub enum JsdSegError {
    /// A sequence contains a symbol that is not part of the alphabet.
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// The offending symbol.
        symbol: char,
        /// Char offset of the symbol within the checked segment.
        position: usize,
    },

    /// No calibration was supplied and the alphabet size has no preset.
    #[error("Unsupported alphabet size: {0} (presets exist for 2, 4 and 12; supply calibration parameters explicitly)")]
    UnsupportedAlphabetSize(usize),

    /// Frequencies were requested for a zero-length segment.
    #[error("Cannot estimate symbol frequencies of an empty segment")]
    EmptySegment,

    /// The alphabet is malformed.
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// Calibration parameters are out of range.
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Cut position outside the open interval of a sequence.
    #[error("Invalid cut position: {position} (must be in 1..{length})")]
    InvalidPosition {
        /// The requested position.
        position: usize,
        /// Length of the sequence being cut.
        length: usize,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for jsdseg operations.
pub type Result<T> = std::result::Result<T, JsdSegError>;
