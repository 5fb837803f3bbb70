//! Configuration types for the tokenizer.
//!
//! [`TokenizerConfig`] controls how an email body is cleaned before it is
//! split into tokens. The defaults reproduce the preprocessing the embedding
//! vocabulary was trained with, so changing any of them means the lookup
//! stage will miss tokens it would otherwise find.
//!
//! # Versioning
//!
//! Any change to tokenization behavior (even bug fixes) must be accompanied
//! by a version bump so that artifacts trained against an older tokenizer can
//! be told apart.
//!
//! # Examples
//!
//! ```rust
//! use canonical::TokenizerConfig;
//!
//! let config = TokenizerConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.lowercase);
//! assert!(config.strip_punctuation);
//! assert!(!config.normalize_unicode);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the tokenizer.
///
/// Cheap to clone and serializable, so it can live inside the detector's
/// YAML configuration:
///
/// ```yaml
/// tokenizer:
///   version: 1
///   lowercase: true
///   strip_punctuation: true
///   normalize_unicode: false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Version of the tokenization rules. Must be >= 1.
    pub version: u32,

    /// Apply locale-free Unicode lowercasing to the whole (normalized) text.
    pub lowercase: bool,

    /// Remove every character that is neither a word character
    /// (a letter, a number, or `_`) nor whitespace.
    ///
    /// Removed characters are dropped, not replaced, so `"it's"` becomes
    /// `"its"` and `"e-mail"` becomes `"email"`.
    pub strip_punctuation: bool,

    /// Apply Unicode NFKC normalization first.
    ///
    /// Off by default: the production vocabulary was built from
    /// unnormalized text, and turning this on maps compatibility forms
    /// (full-width letters, ligatures) onto their plain spellings.
    pub normalize_unicode: bool,
}

impl TokenizerConfig {
    /// Reject configurations no tokenizer version understands.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "tokenizer version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            lowercase: true,
            strip_punctuation: true,
            normalize_unicode: false,
        }
    }
}
