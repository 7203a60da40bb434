//! The read-only state every request works from

use crate::data::DemandSeries;
use crate::derived::{
    DerivedMetrics, DerivedMetricsEngine, ForecastSummary, MetricPolicy, MetricsRequest,
    ReliabilityEstimate, WeatherSample,
};
use crate::error::Result;
use crate::features::LAG_WIDTH;
use crate::models::DemandModel;
use tracing::debug;

/// Readings handed to the reliability group
const RELIABILITY_TAIL: usize = 2;

/// Series, model and metric policy, built once at start-up.
///
/// Nothing here is mutated after construction, so one instance can be shared
/// behind an `Arc` by any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct ForecastContext {
    series: DemandSeries,
    model: DemandModel,
    engine: DerivedMetricsEngine,
}

impl ForecastContext {
    /// Assemble a context
    pub fn new(series: DemandSeries, model: DemandModel, policy: MetricPolicy) -> Self {
        Self {
            series,
            model,
            engine: DerivedMetricsEngine::new(policy),
        }
    }

    pub fn series(&self) -> &DemandSeries {
        &self.series
    }

    pub fn model(&self) -> &DemandModel {
        &self.model
    }

    pub fn engine(&self) -> &DerivedMetricsEngine {
        &self.engine
    }

    /// Whether forecasts can be served
    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    /// Forecast the day after the last stored reading
    pub fn forecast_next(&self) -> Result<f64> {
        let window = self.series.last_n(LAG_WIDTH)?;
        let forecast = self.model.predict(&window)?;
        debug!(?window, forecast, "forecast from stored series");
        Ok(forecast)
    }

    /// Forecast from caller-supplied history, oldest first
    pub fn forecast_from(&self, history: &[f64]) -> Result<f64> {
        self.model.predict(history)
    }

    /// Forecast with its peak scenario
    pub fn forecast_summary(&self) -> Result<ForecastSummary> {
        let forecast = self.forecast_next()?;
        Ok(self.engine.forecast_summary(forecast, self.model.algorithm()))
    }

    /// Reliability of the stored actuals; needs no model
    pub fn reliability(&self) -> Result<ReliabilityEstimate> {
        let tail = self.series.last_n(RELIABILITY_TAIL)?;
        self.engine.reliability(&tail)
    }

    /// Build the derivation request for the stored series.
    ///
    /// Fails only when the forecast itself cannot be made; a short tail
    /// leaves reliability unavailable instead.
    pub fn metrics_request(&self, weather: Option<WeatherSample>) -> Result<MetricsRequest> {
        let forecast = self.forecast_next()?;
        let mut request = MetricsRequest::new(forecast, self.model.algorithm());

        if let Ok(tail) = self.series.last_n(RELIABILITY_TAIL) {
            request = request.with_recent_actuals(tail);
        }
        if let Some(sample) = weather {
            request = request.with_weather(sample);
        }

        Ok(request)
    }

    /// Every metric group for the next-day forecast
    pub fn analyze(&self, weather: Option<WeatherSample>) -> Result<DerivedMetrics> {
        let request = self.metrics_request(weather)?;
        Ok(self.engine.derive(&request))
    }
}
