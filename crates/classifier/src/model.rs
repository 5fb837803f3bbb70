use crate::error::ClassifierError;

/// Probability estimation for two classes given a feature vector.
///
/// Implementations are immutable after construction and safe to share
/// across request handlers.
pub trait BinaryClassifier: Send + Sync {
    /// Short model name used in logs, metrics and error messages.
    fn name(&self) -> &'static str;

    /// Length of the feature vector the model was trained on.
    fn n_features(&self) -> usize;

    /// Probability of the positive ("phishing") class, in `[0, 1]`.
    fn positive_probability(&self, features: &[f64]) -> Result<f64, ClassifierError>;
}
