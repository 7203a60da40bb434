//! Entry points behind the `train` and `serve` subcommands

use crate::api::{self, AppState};
use crate::cli::{ServeArgs, TrainArgs};
use crate::config::ServerConfig;
use crate::weather::WeatherSimulator;
use anyhow::{Context, Result};
use grid_forecast::models::{DemandModel, ForestParams, RandomForest};
use grid_forecast::{train_from_series, DataLoader, ForecastContext};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Train on the CSV series and write the model artifact
pub fn run_train(args: &TrainArgs) -> Result<()> {
    let series = DataLoader::from_csv(&args.data, &args.region)
        .with_context(|| format!("Failed to load demand series: {}", args.data.display()))?;

    let forest = RandomForest::new(ForestParams {
        n_estimators: args.trees,
        seed: args.seed,
        ..ForestParams::default()
    })?;

    let (model, report) = train_from_series(&series, &forest, args.holdout)?;

    info!(
        region = %report.region,
        points = report.series_points,
        rows = report.lag_rows,
        holdout_rows = report.holdout_rows,
        in_sample_mae = report.in_sample.mae,
        residual_std_dev = report.residual_std_dev,
        "training complete"
    );
    if let Some(holdout) = &report.holdout {
        info!("hold-out {}", holdout);
    }

    model
        .save(&args.model)
        .with_context(|| format!("Failed to save model: {}", args.model.display()))?;
    Ok(())
}

/// Build the shared context from configuration.
///
/// A missing model file is not fatal: the context starts uninitialized and
/// forecast routes answer 503 until a model is trained.
pub fn build_context(config: &ServerConfig) -> Result<ForecastContext> {
    let data = &config.data;
    let series = DataLoader::from_csv(&data.series_path, &data.region).with_context(|| {
        format!("Failed to load demand series: {}", data.series_path.display())
    })?;

    let model = load_model(&data.model_path)?;
    info!(
        region = %data.region,
        points = series.len(),
        ready = model.is_ready(),
        "forecast context built"
    );

    Ok(ForecastContext::new(series, model, config.policy.clone()))
}

fn load_model(path: &Path) -> Result<DemandModel> {
    if !path.exists() {
        warn!(path = %path.display(), "model file not found, serving in not-ready mode");
        return Ok(DemandModel::uninitialized());
    }
    DemandModel::load(path).with_context(|| format!("Failed to load model: {}", path.display()))
}

/// Load everything once and serve until interrupted
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    let config = ServerConfig::load_or_default(&args.config)?;
    let context = Arc::new(build_context(&config)?);
    let weather = Arc::new(WeatherSimulator::new(&config.weather)?);
    let app = api::router(AppState::new(context, weather));

    let addr = args
        .bind
        .clone()
        .unwrap_or_else(|| config.server.address());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("GridFlow listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("GridFlow stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
