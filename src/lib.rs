//! Workspace umbrella crate for the phishnet phishing-email classifier.
//!
//! Stitches the tokenizer, the embedding stage and the two pre-trained
//! classifiers into a single [`Detector`]:
//!
//! ```text
//! text ─► tokenize ─► average embeddings ─┬─► scale ─► logistic regression
//!                                         └──────────► random forest
//! ```
//!
//! The logistic regression was trained on standardized features and the
//! random forest on raw ones, so only the first gets the scaled copy.
//!
//! Everything is loaded once ([`Detector::from_config`]) and immutable
//! afterwards; a `Detector` can be shared behind an `Arc` by any number of
//! threads without locking.

pub mod analysis;
pub mod artifacts;
pub mod config;
pub mod metrics;

pub use crate::analysis::{AnalysisReport, EmailAnalysis, RiskLevel};
pub use crate::artifacts::{ArtifactError, Artifacts};
pub use crate::config::{ArtifactConfig, ConfigLoadError, DetectorConfig};
pub use crate::metrics::{set_pipeline_metrics, PipelineMetrics};
pub use canonical::{tokenize, tokenize_with, CanonicalError, Token, TokenizerConfig};
pub use classifier::{
    round_confidence, BinaryClassifier, ClassifierError, Label, LogisticRegression, RandomForest,
    StandardScaler, Verdict,
};
pub use embedding::{vectorize, EmbeddingError, EmbeddingModel, FeatureVector};
pub use ingest::{extract_urls, parse_email, EmailFormat, EmailMessage, IngestError};

use embedding::{vectorize_counted, Vectorized};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::MetricsSpan;

/// Errors that can occur while building a detector or scoring a text.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("artifact failure: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("tokenizer failure: {0}")]
    Tokenizer(#[from] CanonicalError),

    #[error("classification failed: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Both classifiers' answers for one text.
///
/// Serializes to the `/predict` response body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Logistic regression over scaled features.
    pub logistic_regression: Verdict,
    /// Random forest over raw features.
    pub random_forest: Verdict,
}

/// The prediction pipeline with its loaded artifacts.
#[derive(Debug, Clone)]
pub struct Detector {
    artifacts: Artifacts,
    tokenizer: TokenizerConfig,
}

impl Detector {
    pub fn new(artifacts: Artifacts, tokenizer: TokenizerConfig) -> Result<Self, PipelineError> {
        tokenizer.validate()?;
        Ok(Self {
            artifacts,
            tokenizer,
        })
    }

    /// Loads the artifacts named by `cfg`. Any failure here is meant to be
    /// fatal for the caller.
    pub fn from_config(cfg: &DetectorConfig) -> Result<Self, PipelineError> {
        let artifacts = Artifacts::load(&cfg.artifacts)?;
        Self::new(artifacts, cfg.tokenizer.clone())
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    pub fn tokenizer(&self) -> &TokenizerConfig {
        &self.tokenizer
    }

    /// Averaged-embedding feature vector for `text`, before any scaling.
    ///
    /// Always [`Artifacts::dim`] long; all zeros when no token is in the
    /// vocabulary.
    pub fn features(&self, text: &str) -> FeatureVector {
        self.vectorize(text).features
    }

    /// Scores `text` with both classifiers.
    pub fn predict(&self, text: &str) -> Result<PredictionResult, PipelineError> {
        let Vectorized {
            features,
            token_count,
            matched,
        } = self.vectorize(text);

        let scaled = self.artifacts.scaler().transform(features.as_slice())?;
        let logistic_regression = classify(self.artifacts.logistic_regression(), &scaled)?;
        let random_forest = classify(self.artifacts.random_forest(), features.as_slice())?;

        tracing::debug!(
            tokens = token_count,
            matched,
            lr_confidence = logistic_regression.confidence,
            rf_confidence = random_forest.confidence,
            "prediction complete"
        );

        Ok(PredictionResult {
            logistic_regression,
            random_forest,
        })
    }

    fn vectorize(&self, text: &str) -> Vectorized {
        let span = MetricsSpan::start();
        let tokens = tokenize_with(text, &self.tokenizer);
        let out = vectorize_counted(&tokens, self.artifacts.embeddings());
        if let Some(span) = span {
            span.record_features(out.token_count, out.matched);
        }
        out
    }
}

fn classify(model: &dyn BinaryClassifier, features: &[f64]) -> Result<Verdict, PipelineError> {
    let span = MetricsSpan::start();
    let result = model.positive_probability(features).map(Verdict::from_probability);
    if let Some(span) = span {
        span.record_classifier(model.name(), result.as_ref().map(|v| v.prediction));
    }
    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classifier::TreeArrays;

    /// Two-dimensional detector where the random forest looks at raw
    /// feature 0 and the logistic regression at scaled feature 0.
    fn detector() -> Detector {
        let embeddings = EmbeddingModel::from_entries(
            2,
            vec![
                ("verify", vec![1.0, 0.0]),
                ("password", vec![0.8, 0.2]),
                ("lunch", vec![0.0, 1.0]),
            ],
        )
        .expect("embeddings");
        let scaler = StandardScaler::new(vec![0.5, 0.5], vec![0.25, 0.25]).expect("scaler");
        let lr = LogisticRegression::new(vec![3.0, -3.0], 0.0).expect("lr");
        let rf = RandomForest::from_arrays(
            2,
            &[TreeArrays {
                children_left: vec![1, -1, -1],
                children_right: vec![2, -1, -1],
                feature: vec![0, -2, -2],
                threshold: vec![0.5, -2.0, -2.0],
                value: vec![[5.0, 5.0], [4.0, 1.0], [1.0, 4.0]],
            }],
        )
        .expect("rf");

        let artifacts = Artifacts::new(embeddings, scaler, lr, rf).expect("artifacts");
        Detector::new(artifacts, TokenizerConfig::default()).expect("detector")
    }

    #[test]
    fn phishing_text_scores_high() {
        let result = detector().predict("Verify your PASSWORD!").expect("predict");
        assert_eq!(result.logistic_regression.prediction, Label::Phishing);
        assert_eq!(result.random_forest.prediction, Label::Phishing);
        assert_eq!(result.random_forest.confidence, 0.8);
    }

    #[test]
    fn benign_text_scores_low() {
        let result = detector().predict("lunch?").expect("predict");
        assert_eq!(result.logistic_regression.prediction, Label::NonPhishing);
        assert_eq!(result.random_forest.prediction, Label::NonPhishing);
        assert_eq!(result.random_forest.confidence, 0.2);
    }

    #[test]
    fn empty_text_is_not_an_error() {
        let d = detector();
        let features = d.features("");
        assert_eq!(features.len(), 2);
        assert!(features.is_zero());

        let result = d.predict("").expect("predict");
        // Scaled zero vector is (-2, -2): the LR margin cancels to 0.
        assert_eq!(result.logistic_regression.confidence, 0.5);
        assert_eq!(result.logistic_regression.prediction, Label::NonPhishing);
        assert_eq!(result.random_forest.confidence, 0.2);
    }

    #[test]
    fn invalid_tokenizer_rejected() {
        let artifacts = detector().artifacts().clone();
        let cfg = TokenizerConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            Detector::new(artifacts, cfg),
            Err(PipelineError::Tokenizer(_))
        ));
    }

    #[test]
    fn result_serializes_to_response_shape() {
        let result = detector().predict("verify").expect("predict");
        let json = serde_json::to_value(result).expect("json");
        let lr = &json["logistic_regression"];
        let rf = &json["random_forest"];
        assert_eq!(lr["prediction"], "phishing");
        assert!(lr["confidence"].is_f64());
        assert_eq!(rf["prediction"], "phishing");
        assert_eq!(rf["confidence"], 0.8);
    }
}
