//! Error types for duplex thermodynamics.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The two strands cannot pair flush end to end
    #[error("the two strands of a duplex must have the same length ({primary} nt vs {secondary} nt)")]
    LengthMismatch { primary: usize, secondary: usize },

    /// Two neighbouring positions are both mismatched
    #[error(
        "mismatches at adjacent positions {first} and {second} are not supported\n{diagram}"
    )]
    ConsecutiveMismatch {
        first: usize,
        second: usize,
        diagram: String,
    },

    /// No tabulated enthalpy/entropy for a nearest-neighbor step
    #[error("the nearest neighbor '{step}' is not supported")]
    ParameterNotFound { step: String },

    /// Concentrations or temperature outside the model's domain
    #[error("invalid conditions: {0}")]
    InvalidConditions(String),

    /// A strand with symbols other than A, C, G and T, or too short
    #[error("invalid sequence {sequence:?}: {reason}")]
    InvalidSequence { sequence: String, reason: String },

    /// A malformed parameter table entry
    #[error("invalid nearest-neighbor parameter entry {0:?}")]
    InvalidParameter(String),

    /// Two duplexes with the same name in one input
    #[error("duplicate duplex name {0:?}")]
    DuplicateName(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
