//! Startup loading of the four pre-trained artifacts.

use std::path::{Path, PathBuf};
use std::time::Instant;

use classifier::{
    BinaryClassifier, ClassifierError, LogisticRegression, RandomForest, StandardScaler,
};
use embedding::{EmbeddingError, EmbeddingModel};
use thiserror::Error;

use crate::config::ArtifactConfig;

/// An artifact could not be loaded, or the artifacts disagree on shape.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to load embedding model from {}: {source}", path.display())]
    Embedding {
        path: PathBuf,
        #[source]
        source: EmbeddingError,
    },

    #[error("failed to load {artifact} from {}: {source}", path.display())]
    Model {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: ClassifierError,
    },

    #[error("{artifact} expects {expected} features but the embedding dimension is {dim}")]
    DimensionMismatch {
        artifact: &'static str,
        expected: usize,
        dim: usize,
    },
}

/// The loaded, immutable model set.
///
/// Construction checks that the scaler and both classifiers were trained on
/// vectors of the embedding dimension, so a shape mismatch stops the process
/// at startup instead of failing every request.
#[derive(Debug, Clone)]
pub struct Artifacts {
    embeddings: EmbeddingModel,
    scaler: StandardScaler,
    logistic_regression: LogisticRegression,
    random_forest: RandomForest,
}

impl Artifacts {
    pub fn new(
        embeddings: EmbeddingModel,
        scaler: StandardScaler,
        logistic_regression: LogisticRegression,
        random_forest: RandomForest,
    ) -> Result<Self, ArtifactError> {
        let dim = embeddings.dim();
        let declared = [
            ("scaler", scaler.n_features()),
            (
                logistic_regression.name(),
                logistic_regression.n_features(),
            ),
            (random_forest.name(), random_forest.n_features()),
        ];
        for (artifact, expected) in declared {
            if expected != dim {
                return Err(ArtifactError::DimensionMismatch {
                    artifact,
                    expected,
                    dim,
                });
            }
        }

        Ok(Self {
            embeddings,
            scaler,
            logistic_regression,
            random_forest,
        })
    }

    /// Reads all four files named by `cfg`.
    pub fn load(cfg: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let start = Instant::now();

        let path = cfg.embedding_path();
        let embeddings = EmbeddingModel::load(&path)
            .map_err(|source| ArtifactError::Embedding { path, source })?;
        let scaler = load_model("scaler", &cfg.scaler_path(), |p| StandardScaler::load(p))?;
        let logistic_regression = load_model(
            "logistic regression",
            &cfg.logistic_regression_path(),
            |p| LogisticRegression::load(p),
        )?;
        let random_forest = load_model(
            "random forest",
            &cfg.random_forest_path(),
            |p| RandomForest::load(p),
        )?;

        let artifacts = Self::new(embeddings, scaler, logistic_regression, random_forest)?;
        tracing::info!(
            dir = %cfg.dir.display(),
            dim = artifacts.dim(),
            vocab = artifacts.embeddings.vocab_size(),
            trees = artifacts.random_forest.n_trees(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "artifacts loaded"
        );
        Ok(artifacts)
    }

    /// Embedding dimension shared by every artifact.
    pub fn dim(&self) -> usize {
        self.embeddings.dim()
    }

    pub fn embeddings(&self) -> &EmbeddingModel {
        &self.embeddings
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn logistic_regression(&self) -> &LogisticRegression {
        &self.logistic_regression
    }

    pub fn random_forest(&self) -> &RandomForest {
        &self.random_forest
    }
}

fn load_model<T>(
    artifact: &'static str,
    path: &Path,
    load: impl FnOnce(&Path) -> Result<T, ClassifierError>,
) -> Result<T, ArtifactError> {
    load(path).map_err(|source| ArtifactError::Model {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}
