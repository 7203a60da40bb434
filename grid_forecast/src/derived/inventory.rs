//! Equipment inventory implied by a demand forecast

use grid_math::round_to_cents;
use serde::{Deserialize, Serialize};

/// Equipment quantities per forecast megawatt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryRates {
    /// Transformers per MW
    pub transformers_per_mw: f64,
    /// Kilometres of heavy cable per MW
    pub cable_km_per_mw: f64,
    /// Insulators per MW
    pub insulators_per_mw: f64,
}

impl Default for InventoryRates {
    fn default() -> Self {
        Self {
            transformers_per_mw: 0.05,
            cable_km_per_mw: 1.2,
            insulators_per_mw: 15.0,
        }
    }
}

/// Equipment needed to carry a forecast load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEstimate {
    pub transformers: f64,
    pub heavy_cables_km: f64,
    pub insulators: f64,
}

/// Scale the forecast into equipment quantities, each rounded to 2 decimals.
///
/// No clamping is applied: a negative forecast yields negative quantities.
pub fn estimate(forecast_mw: f64, rates: &InventoryRates) -> InventoryEstimate {
    InventoryEstimate {
        transformers: round_to_cents(forecast_mw * rates.transformers_per_mw),
        heavy_cables_km: round_to_cents(forecast_mw * rates.cable_km_per_mw),
        insulators: round_to_cents(forecast_mw * rates.insulators_per_mw),
    }
}
