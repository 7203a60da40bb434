//! Demand regression models

use crate::error::{ForecastError, Result};
use crate::features::{LagFeatures, LagRow, LAG_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs;
use std::path::Path;
use tracing::info;

pub mod random_forest;
pub mod tree;

pub use random_forest::{FittedForest, ForestParams, RandomForest};

/// A regressor that can be fitted on lag rows
pub trait Regressor: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedRegressor;

    /// Fit the model on training rows
    fn fit(&self, rows: &[LagRow]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// A fitted regressor
pub trait FittedRegressor: Debug {
    /// Point prediction for one feature vector
    fn predict(&self, features: &LagFeatures) -> f64;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Version written into every artifact
const ARTIFACT_FORMAT: u32 = 1;

/// On-disk form of a trained demand model
#[derive(Debug, Serialize, Deserialize)]
struct ModelArtifact {
    format: u32,
    feature_width: usize,
    forest: FittedForest,
}

/// Next-day demand model.
///
/// Starts uninitialized until trained or loaded; after that it is only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandModel {
    forest: Option<FittedForest>,
}

impl DemandModel {
    /// A model with nothing trained or loaded; every prediction fails
    pub fn uninitialized() -> Self {
        Self { forest: None }
    }

    /// Train with the default forest (100 trees, seed 42)
    pub fn train(rows: &[LagRow]) -> Result<Self> {
        Self::train_with(&RandomForest::default(), rows)
    }

    /// Train with an explicitly configured forest
    pub fn train_with(regressor: &RandomForest, rows: &[LagRow]) -> Result<Self> {
        let forest = regressor.fit(rows)?;
        Ok(Self {
            forest: Some(forest),
        })
    }

    /// Whether a trained forest is present
    pub fn is_ready(&self) -> bool {
        self.forest.is_some()
    }

    /// Algorithm label reported alongside forecasts
    pub fn algorithm(&self) -> &str {
        self.forest
            .as_ref()
            .map(|f| f.name())
            .unwrap_or("uninitialized")
    }

    /// The fitted forest, if any
    pub fn forest(&self) -> Option<&FittedForest> {
        self.forest.as_ref()
    }

    /// Forecast the next period from the three most recent readings.
    ///
    /// `last3` is chronological, oldest first. It is reversed into lag order
    /// (lag_1 = newest) to match the rows the model was trained on.
    pub fn predict(&self, last3: &[f64]) -> Result<f64> {
        let forest = self.require_forest()?;
        let features = LagFeatures::from_history(last3)?;
        Ok(forest.predict(&features))
    }

    /// Forecast from features already in lag order
    pub fn predict_features(&self, features: &LagFeatures) -> Result<f64> {
        Ok(self.require_forest()?.predict(features))
    }

    /// Encode the model as an artifact
    pub fn to_artifact(&self) -> Result<Vec<u8>> {
        let artifact = ModelArtifact {
            format: ARTIFACT_FORMAT,
            feature_width: LAG_WIDTH,
            forest: self.require_forest()?.clone(),
        };
        Ok(serde_json::to_vec(&artifact)?)
    }

    /// Decode a model from an artifact
    pub fn from_artifact(bytes: &[u8]) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;

        if artifact.format != ARTIFACT_FORMAT {
            return Err(ForecastError::ValidationError(format!(
                "Unsupported model artifact format {}",
                artifact.format
            )));
        }

        if artifact.feature_width != LAG_WIDTH {
            return Err(ForecastError::ValidationError(format!(
                "Model expects {} features, this build uses {}",
                artifact.feature_width, LAG_WIDTH
            )));
        }

        artifact.forest.validate()?;

        Ok(Self {
            forest: Some(artifact.forest),
        })
    }

    /// Save the model artifact to `path`, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_artifact()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;

        info!(path = %path.display(), "model artifact saved");
        Ok(())
    }

    /// Load a model artifact from `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let model = Self::from_artifact(&bytes)?;

        info!(
            path = %path.display(),
            trees = model.forest.as_ref().map_or(0, FittedForest::tree_count),
            "model artifact loaded"
        );
        Ok(model)
    }

    fn require_forest(&self) -> Result<&FittedForest> {
        self.forest.as_ref().ok_or_else(|| {
            ForecastError::ModelUninitialized(
                "no model has been trained or loaded".to_string(),
            )
        })
    }
}
