//! Tokenizer interface for text analysis.
//!
//! The tokenizer is the boundary to a morphological analyzer: it splits text
//! into morphemes and fills in offsets, part-of-speech tags, base forms and
//! readings. Any analyzer satisfying [`Tokenizer`] can be plugged into a
//! pipeline without touching the filter chain.
//!
//! # Available Tokenizers
//!
//! - [`lindera::LinderaTokenizer`] - Dictionary-based morphological analysis (`kuromoji_tokenizer`)
//! - [`lexicon::LexiconTokenizer`] - Longest-match segmentation over a small CSV lexicon, for
//!   fixtures and closed vocabularies
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::tokenizer::Tokenizer;
//! use kotodama::analysis::tokenizer::lexicon::LexiconTokenizer;
//!
//! let tokenizer = LexiconTokenizer::from_csv("先生,名詞-一般,先生,センセイ").unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("先生").unwrap().collect();
//! assert_eq!(tokens[0].reading.as_deref(), Some("センセイ"));
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// Offsets of the produced tokens are byte offsets into `text`. Tokens are
/// emitted with a position increment of 1.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use kotodama::analysis::token::{Token, TokenStream};
/// use kotodama::analysis::tokenizer::Tokenizer;
/// use kotodama::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let mut offset = 0;
///         let mut tokens = Vec::new();
///         for part in text.split('、') {
///             tokens.push(Token::with_offsets(part, offset, offset + part.len()));
///             offset += part.len() + '、'.len_utf8();
///         }
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual tokenizer modules
pub mod lexicon;
pub mod lindera;
