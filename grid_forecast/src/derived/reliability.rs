//! Day-over-day stability of recent demand

use crate::error::{ForecastError, Result};
use grid_math::ratio::percent_deviation;
use grid_math::round_to_cents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold separating a stable grid from one under review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityPolicy {
    /// Accuracy (percent) that must be exceeded to report "Stable"
    pub stable_above_pct: f64,
}

impl Default for ReliabilityPolicy {
    fn default() -> Self {
        Self {
            stable_above_pct: 90.0,
        }
    }
}

/// Classification of the accuracy figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReliabilityStatus {
    #[serde(rename = "Stable")]
    Stable,
    #[serde(rename = "Reviewing Patterns")]
    ReviewingPatterns,
}

impl fmt::Display for ReliabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliabilityStatus::Stable => write!(f, "Stable"),
            ReliabilityStatus::ReviewingPatterns => write!(f, "Reviewing Patterns"),
        }
    }
}

/// Accuracy estimate and its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityEstimate {
    /// 100 minus the absolute day-over-day change in percent, 2 decimals
    pub accuracy_pct: f64,
    pub status: ReliabilityStatus,
}

/// Score how closely the latest reading tracked the one before it.
///
/// `latest` is yesterday's actual and `previous` the day before. A zero
/// `latest` leaves the ratio undefined and yields
/// [`ForecastError::DivisionUndefined`].
pub fn assess(latest: f64, previous: f64, policy: &ReliabilityPolicy) -> Result<ReliabilityEstimate> {
    let accuracy_pct = round_to_cents(100.0 - percent_deviation(latest, previous)?);

    let status = if accuracy_pct > policy.stable_above_pct {
        ReliabilityStatus::Stable
    } else {
        ReliabilityStatus::ReviewingPatterns
    };

    Ok(ReliabilityEstimate {
        accuracy_pct,
        status,
    })
}

/// Assess the last two values of a chronological tail
pub fn assess_tail(tail: &[f64], policy: &ReliabilityPolicy) -> Result<ReliabilityEstimate> {
    match tail {
        [.., previous, latest] => assess(*latest, *previous, policy),
        _ => Err(ForecastError::DataInsufficient(format!(
            "Reliability needs the two most recent readings, got {}",
            tail.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_example() {
        let est = assess(100.0, 95.0, &ReliabilityPolicy::default()).unwrap();
        assert_eq!(est.accuracy_pct, 95.0);
        assert_eq!(est.status, ReliabilityStatus::Stable);
        assert_eq!(est.status.to_string(), "Stable");
    }

    #[test]
    fn test_exactly_ninety_is_reviewing() {
        let est = assess(100.0, 110.0, &ReliabilityPolicy::default()).unwrap();
        assert_eq!(est.accuracy_pct, 90.0);
        assert_eq!(est.status, ReliabilityStatus::ReviewingPatterns);
    }

    #[test]
    fn test_zero_latest_is_undefined() {
        assert!(matches!(
            assess(0.0, 95.0, &ReliabilityPolicy::default()),
            Err(ForecastError::DivisionUndefined(_))
        ));
    }

    #[test]
    fn test_tail_uses_last_two_values() {
        let est = assess_tail(&[1.0, 95.0, 100.0], &ReliabilityPolicy::default()).unwrap();
        assert_eq!(est.accuracy_pct, 95.0);
        assert!(matches!(
            assess_tail(&[100.0], &ReliabilityPolicy::default()),
            Err(ForecastError::DataInsufficient(_))
        ));
    }
}
