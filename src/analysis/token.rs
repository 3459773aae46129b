//! Token types and utilities for text analysis.
//!
//! This module defines [`Token`], the unit that flows from the tokenizer
//! through every token filter, and [`TokenStream`], the boxed iterator that
//! carries tokens between stages.
//!
//! # Positions
//!
//! Tokens carry a `position_increment` rather than an absolute position.
//! Removing a token with position increments enabled hands its increment to
//! the next surviving token, so phrase queries still see the gap:
//!
//! ```text
//! Input: "私 は 制限"   (は removed by a part-of-speech filter)
//!
//!   "私"   (pos_inc=1)
//!   "制限" (pos_inc=2)  ← the removed particle's slot is preserved
//! ```
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::token::Token;
//!
//! let token = Token::with_offsets("先生", 18, 24)
//!     .with_part_of_speech("名詞-一般")
//!     .with_reading("センセイ");
//!
//! assert_eq!(token.text, "先生");
//! assert_eq!(token.part_of_speech(), Some("名詞-一般"));
//! assert_eq!(token.reading.as_deref(), Some("センセイ"));
//! assert_eq!(token.position_increment, 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
///
/// # Fields
///
/// - `text` - The current surface form, rewritten by filters
/// - `start_offset` / `end_offset` - Byte offsets in the original text
/// - `position_increment` - Position relative to previous token (default: 1)
/// - `base_form` / `reading` - Morphological attributes from the tokenizer
/// - `keyword` - Protected from rewriting by stemming and form filters
///
/// The part-of-speech tag is fixed by the tokenizer and only readable
/// afterwards through [`Token::part_of_speech`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1: next position
    /// - 0: same position as the previous token
    /// - >1: positions skipped by removed tokens
    pub position_increment: usize,

    /// Dictionary (lemma) form, e.g. "超える" for "超え"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_form: Option<String>,

    /// Katakana reading, e.g. "センセイ" for "先生"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,

    /// Whether this token is protected from rewriting filters
    #[serde(default)]
    pub keyword: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    part_of_speech: Option<String>,
}

impl Token {
    /// Create a new token with the given text and empty offsets.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            base_form: None,
            reading: None,
            keyword: false,
            part_of_speech: None,
        }
    }

    /// Create a new token with text and byte offsets.
    pub fn with_offsets<S: Into<String>>(text: S, start_offset: usize, end_offset: usize) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text)
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The part-of-speech tag assigned by the tokenizer.
    pub fn part_of_speech(&self) -> Option<&str> {
        self.part_of_speech.as_deref()
    }

    /// Set the part-of-speech tag. Intended for tokenizers.
    pub fn with_part_of_speech<S: Into<String>>(mut self, part_of_speech: S) -> Self {
        self.part_of_speech = Some(part_of_speech.into());
        self
    }

    /// Set the base form.
    pub fn with_base_form<S: Into<String>>(mut self, base_form: S) -> Self {
        self.base_form = Some(base_form.into());
        self
    }

    /// Set the reading.
    pub fn with_reading<S: Into<String>>(mut self, reading: S) -> Self {
        self.reading = Some(reading.into());
        self
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Mark this token as a keyword.
    pub fn as_keyword(mut self) -> Self {
        self.keyword = true;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}

/// Absolute positions implied by the increments of `tokens`.
///
/// The first token with an increment of 1 lands on position 0.
pub fn positions(tokens: &[Token]) -> Vec<usize> {
    let mut position: Option<usize> = None;
    tokens
        .iter()
        .map(|token| {
            let next = match position {
                None => token.position_increment.saturating_sub(1),
                Some(p) => p + token.position_increment,
            };
            position = Some(next);
            next
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new("私");
        assert_eq!(token.text, "私");
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, 0);
        assert_eq!(token.position_increment, 1);
        assert!(token.part_of_speech().is_none());
        assert!(!token.keyword);
    }

    #[test]
    fn test_token_with_offsets() {
        let token = Token::with_offsets("制限", 6, 12);
        assert_eq!(token.start_offset, 6);
        assert_eq!(token.end_offset, 12);
        assert_eq!(token.len(), 6);
    }

    #[test]
    fn test_token_builders() {
        let token = Token::new("超え")
            .with_part_of_speech("動詞-自立")
            .with_base_form("超える")
            .with_reading("コエ")
            .with_position_increment(0)
            .as_keyword();

        assert_eq!(token.part_of_speech(), Some("動詞-自立"));
        assert_eq!(token.base_form.as_deref(), Some("超える"));
        assert_eq!(token.reading.as_deref(), Some("コエ"));
        assert_eq!(token.position_increment, 0);
        assert!(token.keyword);
        assert_eq!(token.to_string(), "超え");
    }

    #[test]
    fn test_positions() {
        let tokens = vec![
            Token::new("a"),
            Token::new("b").with_position_increment(2),
            Token::new("c").with_position_increment(0),
            Token::new("d"),
        ];
        assert_eq!(positions(&tokens), vec![0, 2, 2, 3]);

        let leading_gap = vec![Token::new("x").with_position_increment(3)];
        assert_eq!(positions(&leading_gap), vec![2]);
    }

    #[test]
    fn test_serde_skips_missing_attributes() {
        let json = serde_json::to_value(Token::with_offsets("ト", 0, 3)).unwrap();
        assert!(json.get("reading").is_none());
        assert!(json.get("part_of_speech").is_none());
        assert_eq!(json["position_increment"], 1);
    }
}
