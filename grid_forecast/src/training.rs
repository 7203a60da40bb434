//! Offline training pipeline: series to lag rows to a fitted model

use crate::data::DemandSeries;
use crate::error::{ForecastError, Result};
use crate::features::{lag_rows_from_series, LagRow};
use crate::models::{DemandModel, FittedRegressor, RandomForest, Regressor};
use crate::utils::{forecast_accuracy, train_test_split, ForecastAccuracy};
use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::{info, warn};

/// Summary of a training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    /// Region of the training series
    pub region: String,
    /// Readings in the series
    pub series_points: usize,
    /// Lag rows used for the final fit
    pub lag_rows: usize,
    /// Rows held out for evaluation
    pub holdout_rows: usize,
    /// Accuracy of the final model on its own training rows
    pub in_sample: ForecastAccuracy,
    /// Accuracy on the chronological hold-out of a model fitted without it
    pub holdout: Option<ForecastAccuracy>,
    /// Sample standard deviation of the in-sample residuals
    pub residual_std_dev: f64,
}

/// Train on a whole series and report accuracy.
///
/// A model fitted on the leading rows is scored on the trailing
/// `holdout_ratio` share; the returned model is then refitted on every row.
pub fn train_from_series(
    series: &DemandSeries,
    regressor: &RandomForest,
    holdout_ratio: f64,
) -> Result<(DemandModel, TrainingReport)> {
    let rows = lag_rows_from_series(series);
    if rows.is_empty() {
        return Err(ForecastError::DataInsufficient(format!(
            "Series '{}' has {} readings, training needs at least 4",
            series.region(),
            series.len()
        )));
    }

    let (train_rows, holdout_rows) = train_test_split(&rows, holdout_ratio);
    let holdout = if train_rows.is_empty() || holdout_rows.is_empty() {
        None
    } else {
        let fitted = regressor.fit(&train_rows)?;
        Some(score(&fitted, &holdout_rows)?)
    };

    info!(
        region = series.region(),
        rows = rows.len(),
        trees = regressor.params().n_estimators,
        seed = regressor.params().seed,
        "training demand model"
    );

    let model = DemandModel::train_with(regressor, &rows)?;
    let forest = model.forest().ok_or_else(|| {
        ForecastError::ModelUninitialized("training produced no forest".to_string())
    })?;
    let in_sample = score(forest, &rows)?;

    let residuals: Vec<f64> = rows
        .iter()
        .map(|row| row.label - forest.predict(&row.features))
        .collect();
    let residual_std_dev = if residuals.len() > 1 {
        residuals.iter().std_dev()
    } else {
        0.0
    };

    if let Some(holdout) = &holdout {
        info!(mae = holdout.mae, mape = holdout.mape, "hold-out accuracy");
    } else {
        warn!("series too short for a hold-out evaluation");
    }

    let report = TrainingReport {
        region: series.region().to_string(),
        series_points: series.len(),
        lag_rows: rows.len(),
        holdout_rows: holdout_rows.len(),
        in_sample,
        holdout,
        residual_std_dev,
    };

    Ok((model, report))
}

fn score<F: FittedRegressor>(fitted: &F, rows: &[LagRow]) -> Result<ForecastAccuracy> {
    let predicted: Vec<f64> = rows.iter().map(|r| fitted.predict(&r.features)).collect();
    let actual: Vec<f64> = rows.iter().map(|r| r.label).collect();
    forecast_accuracy(&predicted, &actual)
}
