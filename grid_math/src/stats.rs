//! Summary statistics used by the tree learner

use crate::{MathError, Result};

/// Arithmetic mean of a non-empty slice
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty slice".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance of a non-empty slice
pub fn variance(values: &[f64]) -> Result<f64> {
    let m = mean(values)?;
    Ok(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Running sums for squared-error impurity.
///
/// Tracks count, sum and sum of squares so the squared error about the mean
/// can be read off in constant time while a split point sweeps a sorted
/// column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SquaredErrorAccumulator {
    count: usize,
    sum: f64,
    sum_sq: f64,
}

impl SquaredErrorAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an accumulator over every value in `values`
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut acc = Self::new();
        for value in values {
            acc.push(value);
        }
        acc
    }

    /// Add a value
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
    }

    /// Remove a value previously added
    pub fn remove(&mut self, value: f64) {
        self.count -= 1;
        self.sum -= value;
        self.sum_sq -= value * value;
    }

    /// Number of values held
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of the held values, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }

    /// Sum of squared deviations from the mean
    pub fn squared_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_sq - self.sum * self.sum / self.count as f64).max(0.0)
    }
}
