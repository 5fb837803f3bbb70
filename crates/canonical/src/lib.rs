//! Phishnet tokenizer.
//!
//! Turns a raw email body into the word tokens the embedding vocabulary was
//! trained on.
//!
//! ## What we do
//!
//! - Optional Unicode normalization (NFKC, off by default)
//! - Locale-free lowercasing of the whole string, so context-dependent
//!   mappings such as Greek final sigma apply
//! - Punctuation removal: every character that is neither a word character
//!   (general category `L*` or `N*`, or `_`) nor whitespace is dropped in
//!   place; combining marks count as punctuation
//! - Whitespace splitting, with byte offsets into the cleaned text
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence, no failure mode. Empty
//! or punctuation-only input gives an empty token list, which the embedding
//! stage turns into the zero vector.

mod config;
mod error;
mod token;

pub use crate::config::TokenizerConfig;
pub use crate::error::CanonicalError;
pub use crate::token::{tokenize, tokenize_with, Token};
