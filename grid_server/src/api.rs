//! HTTP routes over a shared forecast context

use crate::weather::WeatherSimulator;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use grid_forecast::derived::{
    DerivedMetrics, FinancialEstimate, ForecastSummary, InventoryEstimate, MetricGroup,
    ReliabilityEstimate, SustainabilityEstimate, WeatherAdjustment, WeatherSample, DEMAND_UNIT,
};
use grid_forecast::{ForecastContext, ForecastError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

/// State shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub context: Arc<ForecastContext>,
    pub weather: Arc<WeatherSimulator>,
}

impl AppState {
    pub fn new(context: Arc<ForecastContext>, weather: Arc<WeatherSimulator>) -> Self {
        Self { context, weather }
    }

    /// Caller's temperature if given, else a simulated one
    fn weather_sample(&self, query: &WeatherQuery) -> Result<WeatherSample, ApiError> {
        match query.temp_c {
            Some(t) => Ok(WeatherSample::new(t)?),
            None => Ok(self.weather.sample()),
        }
    }
}

/// Forecast error carried out of a handler
#[derive(Debug)]
pub struct ApiError(ForecastError);

impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            ForecastError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ForecastError::ModelUninitialized(_) => StatusCode::SERVICE_UNAVAILABLE,
            ForecastError::DataInsufficient(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!(error = %self.0, "request failed");
        } else {
            debug!(error = %self.0, %status, "request rejected");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Three most recent readings, oldest first
    pub history: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_demand: f64,
    pub unit: String,
    pub algorithm: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub temp_c: Option<f64>,
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/predict", post(predict_handler))
        .route("/api/v1/forecast", get(forecast_handler))
        .route("/api/v1/inventory", get(inventory_handler))
        .route("/api/v1/financials", get(financials_handler))
        .route("/api/v1/reliability", get(reliability_handler))
        .route("/api/v1/weather", get(weather_handler))
        .route("/api/v1/sustainability", get(sustainability_handler))
        .route("/api/v1/full-analysis", get(full_analysis_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.context.is_ready() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready" })),
        )
    }
}

async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> ApiResult<PredictResponse> {
    let forecast = state.context.forecast_from(&request.history)?;
    Ok(Json(PredictResponse {
        predicted_demand: grid_math::round_to_cents(forecast),
        unit: DEMAND_UNIT.to_owned(),
        algorithm: state.context.model().algorithm().to_owned(),
    }))
}

async fn forecast_handler(State(state): State<AppState>) -> ApiResult<ForecastSummary> {
    Ok(Json(state.context.forecast_summary()?))
}

async fn inventory_handler(State(state): State<AppState>) -> ApiResult<InventoryEstimate> {
    let forecast = state.context.forecast_next()?;
    Ok(Json(state.context.engine().inventory(forecast)))
}

async fn financials_handler(State(state): State<AppState>) -> ApiResult<FinancialEstimate> {
    let forecast = state.context.forecast_next()?;
    Ok(Json(state.context.engine().financial(forecast)))
}

/// Works from stored actuals alone, so it answers even without a model
async fn reliability_handler(
    State(state): State<AppState>,
) -> Json<MetricGroup<ReliabilityEstimate>> {
    Json(MetricGroup::from_result(
        "reliability",
        state.context.reliability(),
    ))
}

async fn weather_handler(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<WeatherAdjustment> {
    let sample = state.weather_sample(&query)?;
    let forecast = state.context.forecast_next()?;
    Ok(Json(state.context.engine().weather(forecast, sample)))
}

async fn sustainability_handler(
    State(state): State<AppState>,
) -> ApiResult<SustainabilityEstimate> {
    let forecast = state.context.forecast_next()?;
    Ok(Json(state.context.engine().sustainability(forecast)))
}

async fn full_analysis_handler(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> ApiResult<DerivedMetrics> {
    let sample = state.weather_sample(&query)?;
    Ok(Json(state.context.analyze(Some(sample))?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let status = |e: ForecastError| ApiError::from(e).status();
        assert_eq!(
            status(ForecastError::ValidationError("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(ForecastError::ModelUninitialized("x".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(ForecastError::DataInsufficient("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(ForecastError::DivisionUndefined("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
