//! Procurement budget and peak-load scenario

use super::inventory::InventoryRates;
use grid_math::round_to_cents;
use serde::{Deserialize, Serialize};

/// Unit prices of grid equipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitCosts {
    /// Price per transformer
    pub transformer: f64,
    /// Price per kilometre of heavy cable
    pub cable_per_km: f64,
    /// Price per insulator. Not part of the budget formula.
    pub insulator: f64,
}

impl Default for UnitCosts {
    fn default() -> Self {
        Self {
            transformer: 500_000.0,
            cable_per_km: 25_000.0,
            insulator: 500.0,
        }
    }
}

/// Budget policy: unit costs plus the emergency peak margin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialPolicy {
    pub costs: UnitCosts,
    /// Fraction added on top of the forecast for the peak scenario
    pub peak_margin: f64,
}

impl Default for FinancialPolicy {
    fn default() -> Self {
        Self {
            costs: UnitCosts::default(),
            peak_margin: 0.20,
        }
    }
}

/// Cost estimate for one forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEstimate {
    /// Forecast with the emergency margin applied, in MW
    pub peak_scenario_mw: f64,
    /// Transformer plus cable spend
    pub total_budget: f64,
}

/// Peak scenario for a forecast
pub fn peak_scenario(forecast_mw: f64, policy: &FinancialPolicy) -> f64 {
    forecast_mw * (1.0 + policy.peak_margin)
}

/// Budget for the transformers and cable a forecast implies.
///
/// Quantities come from the unrounded inventory rates. Insulators are
/// forecast by the inventory group but are not costed here.
pub fn estimate(forecast_mw: f64, rates: &InventoryRates, policy: &FinancialPolicy) -> FinancialEstimate {
    let transformer_spend = forecast_mw * rates.transformers_per_mw * policy.costs.transformer;
    let cable_spend = forecast_mw * rates.cable_km_per_mw * policy.costs.cable_per_km;

    FinancialEstimate {
        peak_scenario_mw: round_to_cents(peak_scenario(forecast_mw, policy)),
        total_budget: round_to_cents(transformer_spend + cable_spend),
    }
}
