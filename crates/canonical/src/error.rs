use thiserror::Error;

/// Errors that can occur while configuring the tokenizer.
///
/// Tokenization itself never fails; only an invalid configuration is
/// rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
