//! Emissions estimate for the forecast load

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation shares of the regional grid, in percent.
///
/// A configured constant, not computed from data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyMix {
    pub thermal_coal_pct: f64,
    pub renewables_pct: f64,
    pub other_pct: f64,
}

impl Default for EnergyMix {
    fn default() -> Self {
        Self {
            thermal_coal_pct: 70.0,
            renewables_pct: 22.0,
            other_pct: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SustainabilityPolicy {
    /// kg CO2 emitted per MWh generated
    pub emission_factor_kg_per_mwh: f64,
    /// kg CO2 one tree absorbs per year
    pub tree_absorption_kg_per_year: f64,
    /// Emissions above which the high-emissions recommendation is given
    pub high_emissions_above_kg: f64,
    pub energy_mix: EnergyMix,
}

impl Default for SustainabilityPolicy {
    fn default() -> Self {
        Self {
            emission_factor_kg_per_mwh: 820.0,
            tree_absorption_kg_per_year: 21.0,
            high_emissions_above_kg: 350_000.0,
            energy_mix: EnergyMix::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmissionsRecommendation {
    #[serde(rename = "High Emissions... shift flexible load to renewable hours.")]
    HighEmissions,
    #[serde(rename = "Stable Emissions.")]
    StableEmissions,
}

impl fmt::Display for EmissionsRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionsRecommendation::HighEmissions => {
                write!(f, "High Emissions... shift flexible load to renewable hours.")
            }
            EmissionsRecommendation::StableEmissions => write!(f, "Stable Emissions."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityEstimate {
    /// CO2 for the forecast load sustained over one hour
    pub co2_kg: f64,
    /// Trees needed to absorb that CO2 in a year, rounded
    pub trees_equivalent: i64,
    pub recommendation: EmissionsRecommendation,
    pub energy_mix: EnergyMix,
}

/// Recommendation for an emissions figure; strictly above the threshold is high
pub fn recommend(co2_kg: f64, policy: &SustainabilityPolicy) -> EmissionsRecommendation {
    if co2_kg > policy.high_emissions_above_kg {
        EmissionsRecommendation::HighEmissions
    } else {
        EmissionsRecommendation::StableEmissions
    }
}

/// Emissions of the forecast load held for one hour
pub fn estimate(forecast_mw: f64, policy: &SustainabilityPolicy) -> SustainabilityEstimate {
    let co2_kg = forecast_mw * policy.emission_factor_kg_per_mwh;

    SustainabilityEstimate {
        co2_kg,
        trees_equivalent: (co2_kg / policy.tree_absorption_kg_per_year).round() as i64,
        recommendation: recommend(co2_kg, policy),
        energy_mix: policy.energy_mix.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousand_megawatts() {
        let est = estimate(1000.0, &SustainabilityPolicy::default());
        assert_eq!(est.co2_kg, 820_000.0);
        assert_eq!(est.trees_equivalent, 39_048);
        assert_eq!(est.recommendation, EmissionsRecommendation::HighEmissions);
        assert!(est.recommendation.to_string().starts_with("High Emissions"));
    }

    #[test]
    fn test_energy_mix_sums_to_hundred() {
        let mix = EnergyMix::default();
        assert_eq!(mix.thermal_coal_pct + mix.renewables_pct + mix.other_pct, 100.0);
    }

    #[test]
    fn test_recommendation_serializes_as_label() {
        let high = serde_json::to_value(estimate(1000.0, &SustainabilityPolicy::default())).unwrap();
        assert_eq!(
            high["recommendation"],
            "High Emissions... shift flexible load to renewable hours."
        );

        let stable = serde_json::to_value(EmissionsRecommendation::StableEmissions).unwrap();
        assert_eq!(stable, "Stable Emissions.");

        let back: EmissionsRecommendation = serde_json::from_value(stable).unwrap();
        assert_eq!(back, EmissionsRecommendation::StableEmissions);
    }
}
