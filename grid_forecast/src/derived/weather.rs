//! Temperature adjustment of the demand forecast

use crate::error::{ForecastError, Result};
use grid_math::round_to_cents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cooling-load response to heat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherPolicy {
    /// Temperature up to which demand is unaffected, in °C
    pub comfort_ceiling_c: f64,
    /// Fractional demand increase per degree above the ceiling
    pub increase_per_degree: f64,
    /// Temperature above which a heatwave warning is raised, in °C
    pub heatwave_above_c: f64,
}

impl Default for WeatherPolicy {
    fn default() -> Self {
        Self {
            comfort_ceiling_c: 30.0,
            increase_per_degree: 0.03,
            heatwave_above_c: 35.0,
        }
    }
}

/// An ambient temperature reading supplied with a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub ambient_temp_c: f64,
}

impl WeatherSample {
    /// Create a sample, rejecting non-finite temperatures
    pub fn new(ambient_temp_c: f64) -> Result<Self> {
        if !ambient_temp_c.is_finite() {
            return Err(ForecastError::ValidationError(format!(
                "Ambient temperature must be finite, got {}",
                ambient_temp_c
            )));
        }
        Ok(Self { ambient_temp_c })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherStatus {
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Heatwave Warning")]
    HeatwaveWarning,
}

impl fmt::Display for WeatherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherStatus::Normal => write!(f, "Normal"),
            WeatherStatus::HeatwaveWarning => write!(f, "Heatwave Warning"),
        }
    }
}

/// Forecast corrected for ambient temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAdjustment {
    pub ambient_temp_c: f64,
    pub multiplier: f64,
    /// Adjusted demand in MW, 2 decimals
    pub adjusted_mw: f64,
    pub status: WeatherStatus,
}

/// Demand multiplier for a temperature; 1.0 at or below the comfort ceiling, uncapped above
pub fn multiplier(ambient_temp_c: f64, policy: &WeatherPolicy) -> f64 {
    if ambient_temp_c <= policy.comfort_ceiling_c {
        1.0
    } else {
        1.0 + (ambient_temp_c - policy.comfort_ceiling_c) * policy.increase_per_degree
    }
}

/// Apply the temperature multiplier to a forecast
pub fn adjust(forecast_mw: f64, sample: WeatherSample, policy: &WeatherPolicy) -> WeatherAdjustment {
    let multiplier = multiplier(sample.ambient_temp_c, policy);

    let status = if sample.ambient_temp_c > policy.heatwave_above_c {
        WeatherStatus::HeatwaveWarning
    } else {
        WeatherStatus::Normal
    };

    WeatherAdjustment {
        ambient_temp_c: sample.ambient_temp_c,
        multiplier,
        adjusted_mw: round_to_cents(forecast_mw * multiplier),
        status,
    }
}
