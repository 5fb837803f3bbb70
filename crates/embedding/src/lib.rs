//! Phishnet embedding stage.
//!
//! Holds the pre-trained word-embedding table and turns a token sequence into
//! a fixed-length [`FeatureVector`] by averaging the vectors of the tokens
//! the vocabulary knows about.
//!
//! The model is loaded once at startup ([`EmbeddingModel::load`]) and is
//! read-only afterwards, so a single instance can be shared across threads.
//!
//! ## Edge-case policy
//!
//! Unknown tokens are ignored. If no token matches, the output is the zero
//! vector of the model's dimension rather than an error.
//!
//! ## Quick example
//!
//! ```
//! use embedding::{vectorize, EmbeddingModel};
//!
//! let model = EmbeddingModel::from_entries(
//!     2,
//!     vec![("verify", vec![1.0, 0.0]), ("account", vec![0.0, 1.0])],
//! )
//! .unwrap();
//!
//! let features = vectorize(&["verify", "your", "account"], &model);
//! assert_eq!(features.as_slice(), &[0.5, 0.5]);
//! ```

pub mod error;

mod format;
mod model;
mod vector;

pub use crate::error::EmbeddingError;
pub use crate::model::EmbeddingModel;
pub use crate::vector::{vectorize, vectorize_counted, FeatureVector, Vectorized};
