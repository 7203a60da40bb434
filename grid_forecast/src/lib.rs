//! # Grid Forecast
//!
//! Next-day electricity demand forecasting for a single region, and the
//! operational metrics derived from each forecast.
//!
//! ## Features
//!
//! - Daily demand series with CSV ingestion
//! - Three-lag supervised rows for one-step-ahead regression
//! - Seeded random forest regressor with a JSON artifact
//! - Inventory, financial, reliability, weather and sustainability metrics
//! - Partial results: one failed metric group never blocks the rest
//!
//! ## Quick Start
//!
//! ```no_run
//! use grid_forecast::{DataLoader, DemandModel, ForecastContext, MetricPolicy};
//! use grid_forecast::derived::WeatherSample;
//! use grid_forecast::features::lag_rows_from_series;
//!
//! // Load history and train
//! let series = DataLoader::from_csv("data/cleaned_demand.csv", "Maharashtra")?;
//! let model = DemandModel::train(&lag_rows_from_series(&series))?;
//! model.save("models/gridflow_model.json")?;
//!
//! // Build the shared context once, then derive metrics per request
//! let context = ForecastContext::new(series, model, MetricPolicy::default());
//! let metrics = context.analyze(Some(WeatherSample::new(34.0)?))?;
//! println!("{} MW", metrics.forecast.standard_mw);
//! # Ok::<(), grid_forecast::ForecastError>(())
//! ```

pub mod context;
pub mod data;
pub mod derived;
pub mod error;
pub mod features;
pub mod models;
pub mod training;
pub mod utils;

// Re-export commonly used types
pub use crate::context::ForecastContext;
pub use crate::data::{DataLoader, DemandSeries, TimePoint};
pub use crate::derived::{DerivedMetrics, DerivedMetricsEngine, MetricGroup, MetricPolicy};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{LagFeatures, LagRow, LAG_WIDTH};
pub use crate::models::{DemandModel, ForestParams, RandomForest};
pub use crate::training::{train_from_series, TrainingReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
