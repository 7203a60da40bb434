//! # Grid Math
//!
//! Numeric policies for grid demand forecasting.
//! This crate provides the rounding rules, ratio calculations and summary
//! statistics shared by the model and the derived metrics.

use thiserror::Error;

pub mod ratio;
pub mod rounding;
pub mod stats;

pub use ratio::relative_deviation;
pub use rounding::{round_to, round_to_cents};

/// Errors that can occur in grid calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division undefined: {0}")]
    DivisionUndefined(String),
}

/// Result type for grid math operations
pub type Result<T> = std::result::Result<T, MathError>;
