//! Error handling for the Weather Advisor CLI

use shared::ForecastError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Domain errors
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(&'static str),

    // Provider errors
    #[error("Provider payload error: {0}")]
    Provider(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // I/O and encoding errors
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable code used in log fields
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Forecast(ForecastError::UnknownPersona(_)) => "UNKNOWN_PERSONA",
            AppError::Forecast(ForecastError::InvalidThresholds(_)) | AppError::InvalidThresholds(_) => {
                "INVALID_THRESHOLDS"
            }
            AppError::Forecast(_) => "MALFORMED_INPUT",
            AppError::Provider(_) => "PROVIDER_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Read { .. } => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for the service and CLI layers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_persona_code() {
        let err: AppError = ForecastError::UnknownPersona("pilot".into()).into();
        assert_eq!(err.code(), "UNKNOWN_PERSONA");
        assert!(err.to_string().contains("pilot"));
    }

    #[test]
    fn test_malformed_observation_code() {
        let err: AppError = ForecastError::MalformedObservation {
            index: 3,
            reason: "missing field".into(),
        }
        .into();
        assert_eq!(err.code(), "MALFORMED_INPUT");
        assert!(err.to_string().contains("Observation 3"));
    }

    #[test]
    fn test_read_error_names_path() {
        let err = AppError::Read {
            path: "forecast.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.code(), "IO_ERROR");
        assert!(err.to_string().contains("forecast.json"));
    }
}
