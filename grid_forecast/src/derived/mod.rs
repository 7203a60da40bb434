//! Operational metrics derived from a demand forecast.
//!
//! Every metric group is a pure function of the base forecast plus, where
//! needed, a tail of recent actuals or a weather sample. The engine computes
//! the forecast once per request and hands it to each group; a failing group
//! is reported as unavailable without blocking the others.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod financial;
pub mod inventory;
pub mod reliability;
pub mod status;
pub mod sustainability;
pub mod weather;

pub use financial::{FinancialEstimate, FinancialPolicy, UnitCosts};
pub use inventory::{InventoryEstimate, InventoryRates};
pub use reliability::{ReliabilityEstimate, ReliabilityPolicy, ReliabilityStatus};
pub use status::SystemStatus;
pub use sustainability::{EmissionsRecommendation, EnergyMix, SustainabilityEstimate, SustainabilityPolicy};
pub use weather::{WeatherAdjustment, WeatherPolicy, WeatherSample, WeatherStatus};

/// Unit label attached to forecasts
pub const DEMAND_UNIT: &str = "MW";

/// Every constant the metric groups depend on.
///
/// `Default` is the production policy; deployments may override any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricPolicy {
    pub inventory: InventoryRates,
    pub financial: FinancialPolicy,
    pub reliability: ReliabilityPolicy,
    pub weather: WeatherPolicy,
    pub sustainability: SustainabilityPolicy,
}

/// Outcome of one metric group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MetricGroup<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> MetricGroup<T> {
    /// Convert a group result, logging and flagging failures
    pub fn from_result(group: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => MetricGroup::Available(value),
            Err(err) => {
                warn!(group, error = %err, "metric group unavailable");
                MetricGroup::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// The computed value, if any
    pub fn available(&self) -> Option<&T> {
        match self {
            MetricGroup::Available(value) => Some(value),
            MetricGroup::Unavailable { .. } => None,
        }
    }

    /// Whether the group was computed
    pub fn is_available(&self) -> bool {
        matches!(self, MetricGroup::Available(_))
    }

    /// Why the group is missing, if it is
    pub fn reason(&self) -> Option<&str> {
        match self {
            MetricGroup::Available(_) => None,
            MetricGroup::Unavailable { reason } => Some(reason),
        }
    }
}

/// Base forecast with its peak scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    /// Point forecast, 2 decimals
    pub standard_mw: f64,
    /// Forecast with the emergency margin, 2 decimals
    pub peak_mw: f64,
    pub unit: String,
    pub algorithm: String,
}

/// Inputs for one derivation
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRequest {
    /// Base forecast in MW
    pub forecast_mw: f64,
    /// Label of the model that produced the forecast
    pub algorithm: String,
    /// Most recent actuals, oldest first
    pub recent_actuals: Option<Vec<f64>>,
    pub weather: Option<WeatherSample>,
}

impl MetricsRequest {
    /// A request carrying only the forecast
    pub fn new(forecast_mw: f64, algorithm: impl Into<String>) -> Self {
        Self {
            forecast_mw,
            algorithm: algorithm.into(),
            recent_actuals: None,
            weather: None,
        }
    }

    /// Attach the tail of actual readings
    pub fn with_recent_actuals(mut self, tail: Vec<f64>) -> Self {
        self.recent_actuals = Some(tail);
        self
    }

    /// Attach a weather sample
    pub fn with_weather(mut self, sample: WeatherSample) -> Self {
        self.weather = Some(sample);
        self
    }
}

/// Response envelope holding every metric group for one forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub forecast: ForecastSummary,
    pub inventory: InventoryEstimate,
    pub financial: FinancialEstimate,
    pub reliability: MetricGroup<ReliabilityEstimate>,
    pub weather: MetricGroup<WeatherAdjustment>,
    pub sustainability: SustainabilityEstimate,
    pub status: SystemStatus,
}

impl DerivedMetrics {
    /// Names and reasons of the groups that could not be computed
    pub fn unavailable_groups(&self) -> Vec<(&'static str, &str)> {
        [
            ("reliability", self.reliability.reason()),
            ("weather", self.weather.reason()),
        ]
        .into_iter()
        .filter_map(|(group, reason)| reason.map(|r| (group, r)))
        .collect()
    }
}

/// Composes the metric groups under one policy
#[derive(Debug, Clone, Default)]
pub struct DerivedMetricsEngine {
    policy: MetricPolicy,
}

impl DerivedMetricsEngine {
    /// Create an engine with a policy
    pub fn new(policy: MetricPolicy) -> Self {
        Self { policy }
    }

    /// The policy in force
    pub fn policy(&self) -> &MetricPolicy {
        &self.policy
    }

    pub fn forecast_summary(&self, forecast_mw: f64, algorithm: &str) -> ForecastSummary {
        ForecastSummary {
            standard_mw: grid_math::round_to_cents(forecast_mw),
            peak_mw: grid_math::round_to_cents(financial::peak_scenario(
                forecast_mw,
                &self.policy.financial,
            )),
            unit: DEMAND_UNIT.to_string(),
            algorithm: algorithm.to_string(),
        }
    }

    pub fn inventory(&self, forecast_mw: f64) -> InventoryEstimate {
        inventory::estimate(forecast_mw, &self.policy.inventory)
    }

    pub fn financial(&self, forecast_mw: f64) -> FinancialEstimate {
        financial::estimate(forecast_mw, &self.policy.inventory, &self.policy.financial)
    }

    /// Reliability from a chronological tail of actuals
    pub fn reliability(&self, recent_actuals: &[f64]) -> Result<ReliabilityEstimate> {
        reliability::assess_tail(recent_actuals, &self.policy.reliability)
    }

    pub fn weather(&self, forecast_mw: f64, sample: WeatherSample) -> WeatherAdjustment {
        weather::adjust(forecast_mw, sample, &self.policy.weather)
    }

    pub fn sustainability(&self, forecast_mw: f64) -> SustainabilityEstimate {
        sustainability::estimate(forecast_mw, &self.policy.sustainability)
    }

    /// Compute every group for one forecast.
    ///
    /// Missing inputs and undefined ratios only mark their own group
    /// unavailable.
    pub fn derive(&self, request: &MetricsRequest) -> DerivedMetrics {
        let f = request.forecast_mw;

        let reliability = MetricGroup::from_result(
            "reliability",
            request
                .recent_actuals
                .as_deref()
                .ok_or_else(|| {
                    ForecastError::DataInsufficient("no recent actuals supplied".to_string())
                })
                .and_then(|tail| self.reliability(tail)),
        );

        let weather = MetricGroup::from_result(
            "weather",
            request
                .weather
                .ok_or_else(|| {
                    ForecastError::DataInsufficient("no weather sample supplied".to_string())
                })
                .map(|sample| self.weather(f, sample)),
        );

        let mut metrics = DerivedMetrics {
            forecast: self.forecast_summary(f, &request.algorithm),
            inventory: self.inventory(f),
            financial: self.financial(f),
            reliability,
            weather,
            sustainability: self.sustainability(f),
            status: SystemStatus {
                health_score: None,
                alerts: Vec::new(),
            },
        };
        metrics.status = status::summarize(&metrics);
        metrics
    }
}
