//! Bagged ensemble of regression trees

use crate::error::{ForecastError, Result};
use crate::features::{LagFeatures, LagRow, LAG_WIDTH};
use crate::models::tree::{RegressionTree, TreeParams};
use crate::models::{FittedRegressor, Regressor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hyperparameters of the forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Seed for bootstrap sampling and feature selection
    pub seed: u64,
    /// Maximum tree depth, unlimited when `None`
    pub max_depth: Option<usize>,
    /// Minimum rows a node needs before it may split
    pub min_samples_split: usize,
    /// Minimum rows on each side of a split
    pub min_samples_leaf: usize,
    /// Features considered per split, all when `None`
    pub max_features: Option<usize>,
    /// Draw each tree's rows with replacement
    pub bootstrap: bool,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
        }
    }
}

/// Random forest regressor
#[derive(Debug, Clone)]
pub struct RandomForest {
    /// Name of the model
    name: String,
    /// Hyperparameters
    params: ForestParams,
}

/// Trained random forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedForest {
    /// Name of the model
    name: String,
    /// Hyperparameters used for fitting
    params: ForestParams,
    /// Rows seen during fitting
    training_rows: usize,
    /// Fitted trees
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Create a new random forest, validating hyperparameters
    pub fn new(params: ForestParams) -> Result<Self> {
        if params.n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of estimators must be positive".to_string(),
            ));
        }

        if params.min_samples_split < 2 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_split must be at least 2".to_string(),
            ));
        }

        if params.min_samples_leaf == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }

        if let Some(m) = params.max_features {
            if m == 0 || m > LAG_WIDTH {
                return Err(ForecastError::InvalidParameter(format!(
                    "max_features must be between 1 and {}",
                    LAG_WIDTH
                )));
            }
        }

        Ok(Self {
            name: "Random Forest Regressor".to_string(),
            params,
        })
    }

    /// Hyperparameters
    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.params.max_depth,
            min_samples_split: self.params.min_samples_split,
            min_samples_leaf: self.params.min_samples_leaf,
            max_features: self.params.max_features.unwrap_or(LAG_WIDTH),
        }
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self {
            name: "Random Forest Regressor".to_string(),
            params: ForestParams::default(),
        }
    }
}

impl Regressor for RandomForest {
    type Fitted = FittedForest;

    fn fit(&self, rows: &[LagRow]) -> Result<Self::Fitted> {
        if rows.is_empty() {
            return Err(ForecastError::DataInsufficient(format!(
                "Training needs at least one lag row ({} consecutive readings)",
                LAG_WIDTH + 1
            )));
        }

        let tree_params = self.tree_params();
        let mut master = StdRng::seed_from_u64(self.params.seed);
        let n = rows.len();

        let trees = (0..self.params.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.gen());
                let sample: Vec<usize> = if self.params.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                RegressionTree::fit(rows, &sample, &tree_params, &mut rng)
            })
            .collect::<Vec<_>>();

        debug!(
            trees = trees.len(),
            rows = n,
            leaves = trees.iter().map(RegressionTree::leaf_count).sum::<usize>(),
            "random forest fitted"
        );

        Ok(FittedForest {
            name: self.name.clone(),
            params: self.params.clone(),
            training_rows: n,
            trees,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedForest {
    /// Hyperparameters used for fitting
    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Number of rows seen during fitting
    pub fn training_rows(&self) -> usize {
        self.training_rows
    }

    /// Number of trees
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Structural check run on artifacts after decoding
    pub(crate) fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(ForecastError::ValidationError(
                "Model artifact contains no trees".to_string(),
            ));
        }

        if !self.trees.iter().all(RegressionTree::is_well_formed) {
            return Err(ForecastError::ValidationError(
                "Model artifact contains a malformed tree".to_string(),
            ));
        }

        Ok(())
    }
}

impl FittedRegressor for FittedForest {
    fn predict(&self, features: &LagFeatures) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict(features.as_array()))
            .sum();
        total / self.trees.len() as f64
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::build_lag_rows;

    fn rows() -> Vec<LagRow> {
        let values: Vec<f64> = (0..40)
            .map(|i| 1000.0 + 50.0 * ((i as f64) * 0.7).sin() + i as f64)
            .collect();
        build_lag_rows(&values)
    }

    #[test]
    fn test_invalid_params() {
        let zero_trees = ForestParams {
            n_estimators: 0,
            ..ForestParams::default()
        };
        assert!(RandomForest::new(zero_trees).is_err());

        let bad_features = ForestParams {
            max_features: Some(4),
            ..ForestParams::default()
        };
        assert!(RandomForest::new(bad_features).is_err());

        let bad_split = ForestParams {
            min_samples_split: 1,
            ..ForestParams::default()
        };
        assert!(RandomForest::new(bad_split).is_err());
    }

    #[test]
    fn test_empty_rows_rejected() {
        let forest = RandomForest::default();
        assert!(matches!(
            forest.fit(&[]),
            Err(ForecastError::DataInsufficient(_))
        ));
    }

    #[test]
    fn test_fit_is_deterministic_for_seed() {
        let data = rows();
        let forest = RandomForest::new(ForestParams {
            n_estimators: 20,
            ..ForestParams::default()
        })
        .unwrap();

        let a = forest.fit(&data).unwrap();
        let b = forest.fit(&data).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tree_count(), 20);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_prediction_within_label_range() {
        let data = rows();
        let fitted = RandomForest::default().fit(&data).unwrap();
        let min = data.iter().map(|r| r.label).fold(f64::INFINITY, f64::min);
        let max = data.iter().map(|r| r.label).fold(f64::NEG_INFINITY, f64::max);

        let prediction = fitted.predict(&LagFeatures::new([1030.0, 1020.0, 1010.0]));
        assert!(prediction >= min && prediction <= max);
    }

    #[test]
    fn test_without_bootstrap_single_tree_memorizes() {
        let data = rows();
        let forest = RandomForest::new(ForestParams {
            n_estimators: 1,
            bootstrap: false,
            ..ForestParams::default()
        })
        .unwrap();
        let fitted = forest.fit(&data).unwrap();

        for row in &data {
            assert_eq!(fitted.predict(&row.features), row.label);
        }
    }
}
