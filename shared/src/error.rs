//! Errors raised by the forecast core

use thiserror::Error;

/// Structural and argument errors
///
/// Weather values themselves never produce an error: out-of-range numbers are
/// evaluated literally against the thresholds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("Forecast payload is not a list of observations: {0}")]
    MalformedPayload(String),

    #[error("Observation {index} is malformed: {reason}")]
    MalformedObservation { index: usize, reason: String },

    #[error("Current conditions are malformed: {0}")]
    MalformedConditions(String),

    #[error("Unknown persona '{0}', expected 'agriculture' or 'travel'")]
    UnknownPersona(String),

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(&'static str),
}

/// Result type alias for the forecast core
pub type ForecastResult<T> = Result<T, ForecastError>;
