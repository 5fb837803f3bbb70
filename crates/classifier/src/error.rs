use std::io;
use thiserror::Error;

/// Errors raised by the scaler and the classifiers.
///
/// Everything except [`ClassifierError::DimensionMismatch`] happens while
/// loading an artifact. A dimension mismatch at predict time means the
/// caller fed a vector the model was not trained for.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid model json: {0}")]
    Json(#[from] serde_json::Error),
    /// The artifact parsed but describes an unusable model.
    #[error("invalid {model}: {reason}")]
    InvalidModel { model: &'static str, reason: String },
    #[error("{model} expects {expected} features, got {actual}")]
    DimensionMismatch {
        model: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl ClassifierError {
    pub(crate) fn invalid(model: &'static str, reason: impl Into<String>) -> Self {
        ClassifierError::InvalidModel {
            model,
            reason: reason.into(),
        }
    }
}

/// Fails unless `actual == expected`.
pub(crate) fn check_dims(
    model: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ClassifierError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ClassifierError::DimensionMismatch {
            model,
            expected,
            actual,
        })
    }
}
