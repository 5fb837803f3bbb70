//! Random forest over axis-aligned decision trees.
//!
//! Trees arrive in the flat parallel-array layout the training library
//! exports: node `i` is a leaf when `children_left[i] == -1`, otherwise it
//! splits on `feature[i]` at `threshold[i]`, sending `x <= threshold` left.
//! `value[i]` holds the class weights `[negative, positive]` seen at the
//! node; only leaf rows are used at predict time.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::read_json;
use crate::error::{check_dims, ClassifierError};
use crate::model::BinaryClassifier;

const MODEL: &str = "random forest";
const LEAF: i64 = -1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct ForestArtifact {
    n_features: usize,
    trees: Vec<TreeArrays>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        positive: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_arrays(
        arrays: &TreeArrays,
        n_features: usize,
        index: usize,
    ) -> Result<Self, ClassifierError> {
        let bad =
            |reason: String| ClassifierError::invalid(MODEL, format!("tree {index}: {reason}"));

        let n = arrays.children_left.len();
        if n == 0 {
            return Err(bad("no nodes".into()));
        }
        if arrays.children_right.len() != n
            || arrays.feature.len() != n
            || arrays.threshold.len() != n
            || arrays.value.len() != n
        {
            return Err(bad("node arrays differ in length".into()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (arrays.children_left[i], arrays.children_right[i]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(bad(format!("node {i} has exactly one child")));
                }
                let [neg, pos] = arrays.value[i];
                let total = neg + pos;
                if !(neg >= 0.0 && pos >= 0.0 && total > 0.0 && total.is_finite()) {
                    return Err(bad(format!("leaf {i} has unusable class weights")));
                }
                nodes.push(Node::Leaf {
                    positive: pos / total,
                });
                continue;
            }

            // Children always come after their parent, which also rules out cycles.
            let child = |c: i64| -> Result<usize, ClassifierError> {
                match usize::try_from(c) {
                    Ok(c) if c > i && c < n => Ok(c),
                    _ => Err(bad(format!("node {i} points at invalid child {c}"))),
                }
            };
            let feature = match usize::try_from(arrays.feature[i]) {
                Ok(f) if f < n_features => f,
                _ => {
                    return Err(bad(format!(
                        "node {i} splits on feature {} of {n_features}",
                        arrays.feature[i]
                    )))
                }
            };
            let threshold = arrays.threshold[i];
            if !threshold.is_finite() {
                return Err(bad(format!("node {i} has a non-finite threshold")));
            }

            nodes.push(Node::Split {
                feature,
                threshold,
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_probability(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf { positive } => return positive,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // The trees were grown on f32 features; compare at that precision.
                    let x = f64::from(features[feature] as f32);
                    idx = if x <= threshold { left } else { right };
                }
            }
        }
    }
}

/// Ensemble of decision trees; the probability is the mean over trees of
/// the positive-class share at the reached leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<Tree>,
}

impl RandomForest {
    pub fn from_arrays(n_features: usize, trees: &[TreeArrays]) -> Result<Self, ClassifierError> {
        if n_features == 0 {
            return Err(ClassifierError::invalid(MODEL, "n_features must be >= 1"));
        }
        if trees.is_empty() {
            return Err(ClassifierError::invalid(MODEL, "no trees"));
        }
        let trees = trees
            .iter()
            .enumerate()
            .map(|(i, t)| Tree::from_arrays(t, n_features, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { n_features, trees })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let raw: ForestArtifact = read_json(path.as_ref())?;
        let forest = Self::from_arrays(raw.n_features, &raw.trees)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            trees = forest.n_trees(),
            nodes = forest.trees.iter().map(|t| t.nodes.len()).sum::<usize>(),
            "random forest loaded"
        );
        Ok(forest)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, ClassifierError> {
        let raw: ForestArtifact = serde_json::from_reader(reader)?;
        Self::from_arrays(raw.n_features, &raw.trees)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl BinaryClassifier for RandomForest {
    fn name(&self) -> &'static str {
        MODEL
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn positive_probability(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        check_dims(MODEL, self.n_features, features.len())?;
        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.leaf_probability(features))
            .sum();
        Ok(sum / self.trees.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn stump(feature: i64, threshold: f64, left: [f64; 2], right: [f64; 2]) -> TreeArrays {
        TreeArrays {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![
                [left[0] + right[0], left[1] + right[1]],
                left,
                right,
            ],
        }
    }

    fn two_level() -> TreeArrays {
        TreeArrays {
            children_left: vec![1, 2, -1, -1, -1],
            children_right: vec![4, 3, -1, -1, -1],
            feature: vec![1, 0, -2, -2, -2],
            threshold: vec![0.35, 0.3, -2.0, -2.0, -2.0],
            value: vec![[16.0, 8.0], [7.0, 7.0], [6.0, 4.0], [1.0, 3.0], [9.0, 1.0]],
        }
    }

    fn forest() -> RandomForest {
        RandomForest::from_arrays(4, &[stump(0, 0.45, [8.0, 2.0], [1.0, 9.0]), two_level()])
            .expect("forest")
    }

    #[test]
    fn averages_leaf_shares() {
        let f = forest();
        assert_eq!(f.n_trees(), 2);
        let p = f.positive_probability(&[0.0; 4]).expect("proba");
        assert!((p - 0.3).abs() < 1e-12);

        let p = f.positive_probability(&[0.62, 0.08, 0.16, 0.12]).expect("proba");
        assert!((p - 0.825).abs() < 1e-12);

        let p = f.positive_probability(&[0.03, 0.83, 0.0, 0.27]).expect("proba");
        assert!((p - 0.15).abs() < 1e-12);
    }

    #[test]
    fn ties_go_left() {
        let f = RandomForest::from_arrays(1, &[stump(0, 0.5, [1.0, 0.0], [0.0, 1.0])])
            .expect("forest");
        assert_eq!(f.positive_probability(&[0.5]).expect("proba"), 0.0);
        assert_eq!(f.positive_probability(&[0.500_001]).expect("proba"), 1.0);
    }

    #[test]
    fn compares_in_f32_precision() {
        let threshold = f64::from(0.1f32);
        let x = 0.100_000_001_6;
        // Above the threshold in f64, equal to it once narrowed to f32.
        assert!(x > threshold);
        assert_eq!(x as f32, 0.1f32);

        let f = RandomForest::from_arrays(1, &[stump(0, threshold, [1.0, 0.0], [0.0, 1.0])])
            .expect("forest");
        assert_eq!(f.positive_probability(&[x]).expect("proba"), 0.0);
    }

    #[test]
    fn leaf_values_may_be_fractions() {
        let f = RandomForest::from_arrays(1, &[stump(0, 0.0, [0.75, 0.25], [0.1, 0.9])])
            .expect("forest");
        let p = f.positive_probability(&[-1.0]).expect("proba");
        assert!((p - 0.25).abs() < 1e-12);
    }

    #[test]
    fn wrong_dimension_rejected() {
        let err = forest().positive_probability(&[0.0; 3]).unwrap_err();
        assert!(matches!(err, ClassifierError::DimensionMismatch { .. }));
    }

    #[test]
    fn rejects_empty_forest() {
        assert!(RandomForest::from_arrays(4, &[]).is_err());
    }

    #[test]
    fn rejects_out_of_range_feature() {
        let err =
            RandomForest::from_arrays(2, &[stump(5, 0.5, [1.0, 0.0], [0.0, 1.0])]).unwrap_err();
        assert!(err.to_string().contains("feature 5"));
    }

    #[test]
    fn rejects_backward_child() {
        let mut tree = two_level();
        tree.children_left[1] = 0;
        let err = RandomForest::from_arrays(4, &[tree]).unwrap_err();
        assert!(err.to_string().contains("invalid child"));
    }

    #[test]
    fn rejects_ragged_arrays() {
        let mut tree = two_level();
        tree.threshold.pop();
        assert!(RandomForest::from_arrays(4, &[tree]).is_err());
    }

    #[test]
    fn rejects_empty_leaf() {
        let err =
            RandomForest::from_arrays(1, &[stump(0, 0.5, [0.0, 0.0], [0.0, 1.0])]).unwrap_err();
        assert!(err.to_string().contains("leaf 1"));
    }

    #[test]
    fn parses_json_artifact() {
        let json = r#"{
            "n_features": 1,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [0, -2, -2],
                "threshold": [0.5, -2.0, -2.0],
                "value": [[5, 5], [4, 1], [1, 4]]
            }]
        }"#;
        let f = RandomForest::from_json_reader(Cursor::new(json)).expect("forest");
        let p = f.positive_probability(&[0.9]).expect("proba");
        assert!((p - 0.8).abs() < 1e-12);
    }
}
