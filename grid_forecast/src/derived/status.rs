//! Overall grid health and operator alerts

use super::reliability::ReliabilityStatus;
use super::sustainability::EmissionsRecommendation;
use super::weather::WeatherStatus;
use super::DerivedMetrics;
use serde::{Deserialize, Serialize};

/// Health summary shown to operators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Reliability accuracy, absent when reliability could not be computed
    pub health_score: Option<f64>,
    /// Human-readable alerts, empty when all systems are normal
    pub alerts: Vec<String>,
}

impl SystemStatus {
    /// True when there is nothing to alert on
    pub fn is_normal(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Collect health score and alerts from computed metric groups
pub fn summarize(metrics: &DerivedMetrics) -> SystemStatus {
    let mut alerts = Vec::new();

    if let Some(weather) = metrics.weather.available() {
        if weather.status == WeatherStatus::HeatwaveWarning {
            alerts.push(format!(
                "{}: {:.1}°C ambient, demand adjusted to {} MW",
                weather.status, weather.ambient_temp_c, weather.adjusted_mw
            ));
        }
    }

    if metrics.sustainability.recommendation == EmissionsRecommendation::HighEmissions {
        alerts.push(metrics.sustainability.recommendation.to_string());
    }

    if let Some(reliability) = metrics.reliability.available() {
        if reliability.status == ReliabilityStatus::ReviewingPatterns {
            alerts.push(format!(
                "Reliability {}: accuracy {}%",
                reliability.status, reliability.accuracy_pct
            ));
        }
    }

    for (group, reason) in metrics.unavailable_groups() {
        alerts.push(format!("{} unavailable: {}", group, reason));
    }

    SystemStatus {
        health_score: metrics.reliability.available().map(|r| r.accuracy_pct),
        alerts,
    }
}
