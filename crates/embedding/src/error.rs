use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while loading an embedding artifact.
///
/// Vectorization itself never fails; every variant here is a startup
/// problem.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Low-level IO failures while reading the artifact.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The JSON artifact does not match the expected layout.
    #[error("invalid embedding json: {0}")]
    Json(#[from] serde_json::Error),
    /// A line of a word2vec text file could not be parsed.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    /// The file extension does not name a supported format.
    #[error("unsupported embedding format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// A model must have a non-zero dimension.
    #[error("embedding dimension must be >= 1")]
    ZeroDimension,
    /// A vector's length disagrees with the declared dimension.
    #[error("vector for {token:?} has {actual} values, expected {expected}")]
    DimensionMismatch {
        token: String,
        expected: usize,
        actual: usize,
    },
    /// The same token appears twice.
    #[error("duplicate token {0:?}")]
    DuplicateToken(String),
    /// The text header announced a different number of entries.
    #[error("header declares {declared} vectors, file contains {actual}")]
    VocabCountMismatch { declared: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_dimension_mismatch_names_token() {
        let err = EmbeddingError::DimensionMismatch {
            token: "verify".into(),
            expected: 100,
            actual: 99,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"verify\""));
        assert!(msg.contains("99"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn error_parse_carries_line() {
        let err = EmbeddingError::Parse {
            line: 7,
            reason: "bad float".into(),
        };
        assert_eq!(err.to_string(), "line 7: bad float");
    }

    #[test]
    fn error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: EmbeddingError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn error_unsupported_format_shows_path() {
        let err = EmbeddingError::UnsupportedFormat(PathBuf::from("model.pkl"));
        assert!(err.to_string().contains("model.pkl"));
    }
}
