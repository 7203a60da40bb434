//! Ratio calculations with an explicit undefined-division outcome

use crate::{MathError, Result};

/// Signed deviation of `previous` from `latest`, relative to `latest`.
///
/// Returns `(latest - previous) / latest`. A zero `latest` has no defined
/// ratio and yields [`MathError::DivisionUndefined`] instead of an infinity.
pub fn relative_deviation(latest: f64, previous: f64) -> Result<f64> {
    if !latest.is_finite() || !previous.is_finite() {
        return Err(MathError::InvalidInput(format!(
            "Values must be finite (latest={}, previous={})",
            latest, previous
        )));
    }

    if latest == 0.0 {
        return Err(MathError::DivisionUndefined(
            "latest value is zero".to_string(),
        ));
    }

    Ok((latest - previous) / latest)
}

/// Absolute relative deviation expressed in percent
pub fn percent_deviation(latest: f64, previous: f64) -> Result<f64> {
    Ok(relative_deviation(latest, previous)?.abs() * 100.0)
}
