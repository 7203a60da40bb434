//! CART regression tree grown on squared-error reduction

use crate::features::{LagRow, LAG_WIDTH};
use grid_math::stats::SquaredErrorAccumulator;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted regression tree stored as a flat node arena; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

impl RegressionTree {
    /// Grow a tree on the rows selected by `sample` (indices may repeat)
    pub(crate) fn fit(rows: &[LagRow], sample: &[usize], params: &TreeParams, rng: &mut StdRng) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let mut indices = sample.to_vec();
        tree.grow(rows, &mut indices, 0, params, rng);
        tree
    }

    /// Predict the label for a feature vector
    pub fn predict(&self, features: &[f64; LAG_WIDTH]) -> f64 {
        let mut id = 0;
        loop {
            match self.nodes[id] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if features[feature] <= threshold { left } else { right };
                }
            }
        }
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Check every split points at existing children
    pub(crate) fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(id, node)| match *node {
                Node::Leaf { value } => value.is_finite(),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    feature < LAG_WIDTH
                        && threshold.is_finite()
                        && left > id
                        && right > id
                        && left < self.nodes.len()
                        && right < self.nodes.len()
                }
            })
    }

    fn grow(
        &mut self,
        rows: &[LagRow],
        indices: &mut [usize],
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let id = self.nodes.len();
        let parent = SquaredErrorAccumulator::from_values(indices.iter().map(|&i| rows[i].label));
        self.nodes.push(Node::Leaf {
            value: parent.mean().unwrap_or(0.0),
        });

        let depth_reached = params.max_depth.is_some_and(|max| depth >= max);
        if depth_reached
            || indices.len() < params.min_samples_split
            || indices.len() < 2 * params.min_samples_leaf
            || parent.squared_error() <= 0.0
        {
            return id;
        }

        let Some(split) = Self::best_split(rows, indices, parent.squared_error(), params, rng) else {
            return id;
        };

        let mid = partition(indices, |i| rows[i].features.as_array()[split.feature] <= split.threshold);
        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = self.grow(rows, left_indices, depth + 1, params, rng);
        let right = self.grow(rows, right_indices, depth + 1, params, rng);

        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Lowest summed squared error over the candidate features
    fn best_split(
        rows: &[LagRow],
        indices: &[usize],
        parent_error: f64,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Option<Candidate> {
        let n = indices.len();
        let mut best: Option<Candidate> = None;
        let mut best_score = parent_error;

        let features: Vec<usize> = if params.max_features >= LAG_WIDTH {
            (0..LAG_WIDTH).collect()
        } else {
            index::sample(rng, LAG_WIDTH, params.max_features).into_vec()
        };

        let mut column: Vec<(f64, f64)> = Vec::with_capacity(n);

        for feature in features {
            column.clear();
            column.extend(
                indices
                    .iter()
                    .map(|&i| (rows[i].features.as_array()[feature], rows[i].label)),
            );
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left = SquaredErrorAccumulator::new();
            let mut right = SquaredErrorAccumulator::from_values(column.iter().map(|&(_, y)| y));

            for k in 1..n {
                let (x_prev, y_prev) = column[k - 1];
                left.push(y_prev);
                right.remove(y_prev);

                if k < params.min_samples_leaf || n - k < params.min_samples_leaf {
                    continue;
                }

                let x_next = column[k].0;
                if x_prev >= x_next {
                    continue;
                }

                let score = left.squared_error() + right.squared_error();
                if score < best_score {
                    best_score = score;
                    best = Some(Candidate {
                        feature,
                        threshold: midpoint(x_prev, x_next),
                        score,
                    });
                }
            }
        }

        best.filter(|c| c.score < parent_error)
    }
}

/// Split threshold strictly below `hi` so `x <= threshold` separates the pair
fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo + (hi - lo) / 2.0;
    if mid >= hi {
        lo
    } else {
        mid
    }
}

/// Move indices satisfying `goes_left` to the front, returning how many moved
fn partition(indices: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for i in 0..indices.len() {
        if goes_left(indices[i]) {
            indices.swap(i, mid);
            mid += 1;
        }
    }
    mid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::LagFeatures;
    use rand::SeedableRng;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: LAG_WIDTH,
        }
    }

    fn row(lag_1: f64, label: f64) -> LagRow {
        LagRow {
            features: LagFeatures::new([lag_1, 0.0, 0.0]),
            label,
        }
    }

    #[test]
    fn test_tree_memorizes_distinct_points() {
        let rows = vec![row(1.0, 10.0), row(2.0, 20.0), row(3.0, 30.0)];
        let sample: Vec<usize> = (0..rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let tree = RegressionTree::fit(&rows, &sample, &params(), &mut rng);

        assert!(tree.is_well_formed());
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.predict(&[1.0, 0.0, 0.0]), 10.0);
        assert_eq!(tree.predict(&[2.9, 0.0, 0.0]), 30.0);
    }

    #[test]
    fn test_constant_labels_make_single_leaf() {
        let rows = vec![row(1.0, 5.0), row(2.0, 5.0), row(3.0, 5.0)];
        let mut rng = StdRng::seed_from_u64(7);
        let tree = RegressionTree::fit(&rows, &[0, 1, 2], &params(), &mut rng);

        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.predict(&[100.0, 0.0, 0.0]), 5.0);
    }

    #[test]
    fn test_identical_features_cannot_split() {
        let rows = vec![row(1.0, 5.0), row(1.0, 7.0)];
        let mut rng = StdRng::seed_from_u64(7);
        let tree = RegressionTree::fit(&rows, &[0, 1], &params(), &mut rng);

        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.predict(&[1.0, 0.0, 0.0]), 6.0);
    }

    #[test]
    fn test_depth_limit() {
        let rows: Vec<LagRow> = (0..16).map(|i| row(i as f64, (i * i) as f64)).collect();
        let sample: Vec<usize> = (0..rows.len()).collect();
        let limited = TreeParams {
            max_depth: Some(1),
            ..params()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let tree = RegressionTree::fit(&rows, &sample, &limited, &mut rng);

        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn test_midpoint_stays_below_upper_value() {
        let lo: f64 = 1.0;
        let hi = f64::from_bits(lo.to_bits() + 1);
        assert!(midpoint(lo, hi) < hi);
        assert_eq!(midpoint(2.0, 4.0), 3.0);
    }
}
