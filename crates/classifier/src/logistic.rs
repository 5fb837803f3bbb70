use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::read_json;
use crate::error::{check_dims, ClassifierError};
use crate::model::BinaryClassifier;

const MODEL: &str = "logistic regression";

/// Binary logistic regression: `p = σ(coef · x + intercept)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LogisticArtifact")]
pub struct LogisticRegression {
    coef: Vec<f64>,
    intercept: f64,
}

#[derive(Deserialize)]
struct LogisticArtifact {
    coef: Vec<f64>,
    intercept: f64,
}

impl TryFrom<LogisticArtifact> for LogisticRegression {
    type Error = ClassifierError;

    fn try_from(raw: LogisticArtifact) -> Result<Self, Self::Error> {
        LogisticRegression::new(raw.coef, raw.intercept)
    }
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Result<Self, ClassifierError> {
        if coef.is_empty() {
            return Err(ClassifierError::invalid(MODEL, "no coefficients"));
        }
        if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
            return Err(ClassifierError::invalid(MODEL, "non-finite parameter"));
        }
        Ok(Self { coef, intercept })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        read_json(path.as_ref())
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, ClassifierError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Raw margin `coef · x + intercept`.
    pub fn decision_function(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        check_dims(MODEL, self.coef.len(), features.len())?;
        let dot: f64 = self.coef.iter().zip(features).map(|(w, x)| w * x).sum();
        Ok(dot + self.intercept)
    }
}

impl BinaryClassifier for LogisticRegression {
    fn name(&self) -> &'static str {
        MODEL
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn positive_probability(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        self.decision_function(features).map(logistic)
    }
}

/// Logistic sigmoid, split on sign so `exp` never overflows.
fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
