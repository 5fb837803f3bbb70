use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

use crate::config::TokenizerConfig;

/// A token with its UTF-8 byte offsets in the cleaned text.
///
/// The cleaned text is the input after lowercasing and punctuation
/// removal, with every run of whitespace kept as a single separator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the cleaned text.
    pub start: usize,
    /// Byte offset (exclusive) in the cleaned text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Tokenizes `text` with the default [`TokenizerConfig`].
///
/// Lowercases, drops every character that is neither a word character nor
/// whitespace, then splits on whitespace. Never fails: an empty or
/// punctuation-only input yields an empty vector.
///
/// ```rust
/// use canonical::tokenize;
///
/// let tokens: Vec<String> = tokenize("URGENT: verify your account now!!!")
///     .into_iter()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(tokens, ["urgent", "verify", "your", "account", "now"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with(text, &TokenizerConfig::default())
}

/// Tokenizes `text` with an explicit configuration.
///
/// The configuration is assumed valid; see [`TokenizerConfig::validate`].
pub fn tokenize_with(text: &str, cfg: &TokenizerConfig) -> Vec<Token> {
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };
    // Whole-string lowercasing: a capital sigma's form depends on its
    // neighbours.
    let normalized = if cfg.lowercase {
        Cow::Owned(normalized.to_lowercase())
    } else {
        normalized
    };

    let mut state = Tokenizer {
        cleaned: String::with_capacity(normalized.len()),
        tokens: Vec::with_capacity((normalized.len() / 6).saturating_add(1)),
        current_start: None,
    };

    for ch in normalized.chars() {
        state.dispatch(ch, cfg);
    }

    state.finalize_token();
    state.tokens
}

struct Tokenizer {
    cleaned: String,
    tokens: Vec<Token>,
    current_start: Option<usize>,
}

impl Tokenizer {
    fn dispatch(&mut self, ch: char, cfg: &TokenizerConfig) {
        if is_separator(ch) {
            self.finalize_token();
        } else if !cfg.strip_punctuation || is_word_char(ch) {
            self.append_char(ch);
        }
        // Anything else is stripped in place: the surrounding characters
        // stay in the same token.
    }

    fn append_char(&mut self, ch: char) {
        if self.current_start.is_none() {
            if !self.cleaned.is_empty() {
                self.cleaned.push(' ');
            }
            self.current_start = Some(self.cleaned.len());
        }
        self.cleaned.push(ch);
    }

    fn finalize_token(&mut self) {
        if let Some(start) = self.current_start.take() {
            let end = self.cleaned.len();
            self.tokens.push(Token {
                text: self.cleaned[start..end].to_string(),
                start,
                end,
            });
        }
    }
}

/// Letters (`L*`), numbers (`N*`) and `_`. Combining marks are not word
/// characters, so Indic vowel signs are stripped.
fn is_word_char(ch: char) -> bool {
    use GeneralCategory::*;
    ch == '_'
        || matches!(
            get_general_category(ch),
            UppercaseLetter
                | LowercaseLetter
                | TitlecaseLetter
                | ModifierLetter
                | OtherLetter
                | DecimalNumber
                | LetterNumber
                | OtherNumber
        )
}

/// Unicode whitespace, plus the ASCII information separators (U+001C..U+001F)
/// which the training tokenizer also split on.
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}
