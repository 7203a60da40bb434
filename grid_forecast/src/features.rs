//! Lag features for one-step-ahead demand regression

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Number of lagged readings fed to the model
pub const LAG_WIDTH: usize = 3;

/// Lagged readings in lag order: index 0 is lag_1, the most recent reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagFeatures([f64; LAG_WIDTH]);

impl LagFeatures {
    /// Wrap lags already in lag order (lag_1 first)
    pub fn new(lags: [f64; LAG_WIDTH]) -> Self {
        Self(lags)
    }

    /// Build features from a chronological window, oldest reading first.
    ///
    /// The window must hold exactly [`LAG_WIDTH`] finite values. It is
    /// reversed so the newest reading becomes lag_1, matching training.
    pub fn from_history(history: &[f64]) -> Result<Self> {
        let window: [f64; LAG_WIDTH] = history.try_into().map_err(|_| {
            ForecastError::ValidationError(format!(
                "Expected exactly {} historical values, got {}",
                LAG_WIDTH,
                history.len()
            ))
        })?;

        if let Some(bad) = window.iter().find(|v| !v.is_finite()) {
            return Err(ForecastError::ValidationError(format!(
                "Historical values must be finite, got {}",
                bad
            )));
        }

        let [oldest, middle, newest] = window;
        Ok(Self([newest, middle, oldest]))
    }

    /// Lag `k`, 1-based (`lag(1)` is the most recent reading)
    pub fn lag(&self, k: usize) -> Option<f64> {
        k.checked_sub(1).and_then(|i| self.0.get(i).copied())
    }

    /// Lags as an array in lag order
    pub fn as_array(&self) -> &[f64; LAG_WIDTH] {
        &self.0
    }
}

/// One supervised training row: three lags and the reading that followed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagRow {
    /// Lagged inputs
    pub features: LagFeatures,
    /// Observed demand for the period being predicted
    pub label: f64,
}

impl LagRow {
    /// Most recent prior reading
    pub fn lag_1(&self) -> f64 {
        self.features.0[0]
    }

    /// Reading two periods back
    pub fn lag_2(&self) -> f64 {
        self.features.0[1]
    }

    /// Reading three periods back
    pub fn lag_3(&self) -> f64 {
        self.features.0[2]
    }
}

/// Turn a chronological sequence into lag rows.
///
/// Produces one row per index with a full window of predecessors, so a
/// sequence of `n` values yields `n - 3` rows (none when `n < 4`).
pub fn build_lag_rows(values: &[f64]) -> Vec<LagRow> {
    values
        .windows(LAG_WIDTH + 1)
        .map(|w| LagRow {
            features: LagFeatures([w[2], w[1], w[0]]),
            label: w[3],
        })
        .collect()
}

/// Lag rows for every trainable day of a series
pub fn lag_rows_from_series(series: &DemandSeries) -> Vec<LagRow> {
    build_lag_rows(&series.values())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_reversed_into_lag_order() {
        let features = LagFeatures::from_history(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(features.lag(1), Some(3.0));
        assert_eq!(features.lag(2), Some(2.0));
        assert_eq!(features.lag(3), Some(1.0));
        assert_eq!(features.lag(0), None);
        assert_eq!(features.lag(4), None);
    }

    #[test]
    fn test_wrong_arity_rejected() {
        assert!(matches!(
            LagFeatures::from_history(&[1.0, 2.0]),
            Err(ForecastError::ValidationError(_))
        ));
        assert!(LagFeatures::from_history(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LagFeatures::from_history(&[1.0, f64::NAN, 3.0]).is_err());
    }

    #[test]
    fn test_short_sequences_yield_no_rows() {
        assert!(build_lag_rows(&[]).is_empty());
        assert!(build_lag_rows(&[1.0, 2.0, 3.0]).is_empty());
        assert_eq!(build_lag_rows(&[1.0, 2.0, 3.0, 4.0]).len(), 1);
    }
}
