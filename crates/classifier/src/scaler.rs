use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::read_json;
use crate::error::{check_dims, ClassifierError};

const MODEL: &str = "scaler";

/// Per-dimension standardization fitted at training time.
///
/// `transform` computes `(x - mean) / scale` for every component. A zero
/// scale (a feature that was constant in the training data) is stored as
/// `1.0`, which leaves that component centered but unscaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerArtifact")]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

#[derive(Deserialize)]
struct ScalerArtifact {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<ScalerArtifact> for StandardScaler {
    type Error = ClassifierError;

    fn try_from(raw: ScalerArtifact) -> Result<Self, Self::Error> {
        StandardScaler::new(raw.mean, raw.scale)
    }
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, mut scale: Vec<f64>) -> Result<Self, ClassifierError> {
        if mean.is_empty() {
            return Err(ClassifierError::invalid(MODEL, "no dimensions"));
        }
        if mean.len() != scale.len() {
            return Err(ClassifierError::invalid(
                MODEL,
                format!("{} means but {} scales", mean.len(), scale.len()),
            ));
        }
        if let Some(i) = mean
            .iter()
            .chain(scale.iter())
            .position(|x| !x.is_finite())
        {
            return Err(ClassifierError::invalid(
                MODEL,
                format!("non-finite parameter at index {}", i % mean.len()),
            ));
        }
        for s in scale.iter_mut() {
            if *s == 0.0 {
                *s = 1.0;
            }
        }
        Ok(Self { mean, scale })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        read_json(path.as_ref())
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, ClassifierError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Returns a scaled copy of `features`; the input is left untouched.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        check_dims(MODEL, self.n_features(), features.len())?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}
