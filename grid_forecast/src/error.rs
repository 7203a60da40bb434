//! Error types for the grid_forecast crate

use grid_math::MathError;
use thiserror::Error;

/// Custom error types for the grid_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough history to train or to build an inference window
    #[error("Insufficient data: {0}")]
    DataInsufficient(String),

    /// Prediction requested before a model was trained or loaded
    #[error("Model not initialized: {0}")]
    ModelUninitialized(String),

    /// A ratio whose denominator is zero
    #[error("Division undefined: {0}")]
    DivisionUndefined(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to parameter or input validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reading CSV input
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error encoding or decoding a model artifact
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::DivisionUndefined(msg) => ForecastError::DivisionUndefined(msg),
            MathError::InsufficientData(msg) => ForecastError::DataInsufficient(msg),
            MathError::InvalidInput(msg) => ForecastError::ValidationError(msg),
        }
    }
}
