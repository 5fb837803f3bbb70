use serde::{Deserialize, Serialize};

use crate::model::EmbeddingModel;

/// Averaged embedding of a document's tokens.
///
/// Always exactly [`EmbeddingModel::dim`] long. Accumulation happens in
/// `f64` even though the stored vectors are `f32`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// All-zero vector of length `dim`.
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every component is exactly `0.0`.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Elementwise `self += other`. Both sides must have the same length.
    fn add_assign(&mut self, other: &[f32]) {
        debug_assert_eq!(self.0.len(), other.len());
        for (acc, &x) in self.0.iter_mut().zip(other) {
            *acc += f64::from(x);
        }
    }

    /// Elementwise `self /= divisor`.
    fn div_assign(&mut self, divisor: f64) {
        for x in self.0.iter_mut() {
            *x /= divisor;
        }
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Result of averaging a token sequence, with the counts kept for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct Vectorized {
    pub features: FeatureVector,
    /// Tokens seen, matched or not.
    pub token_count: usize,
    /// Tokens found in the vocabulary.
    pub matched: usize,
}

/// Averages the vectors of every in-vocabulary token.
///
/// Out-of-vocabulary tokens are skipped. When nothing matches (including an
/// empty token list) the result is the zero vector of the model's dimension,
/// so downstream classifiers always receive a well-formed input.
pub fn vectorize<T: AsRef<str>>(tokens: &[T], model: &EmbeddingModel) -> FeatureVector {
    vectorize_counted(tokens, model).features
}

/// Same as [`vectorize`], also reporting how many tokens matched.
pub fn vectorize_counted<T: AsRef<str>>(tokens: &[T], model: &EmbeddingModel) -> Vectorized {
    let mut features = FeatureVector::zeros(model.dim());
    let mut matched = 0usize;

    for token in tokens {
        if let Some(vector) = model.get(token.as_ref()) {
            features.add_assign(vector);
            matched += 1;
        }
    }

    if matched > 0 {
        features.div_assign(matched as f64);
    }

    Vectorized {
        features,
        token_count: tokens.len(),
        matched,
    }
}
