//! Token filter implementations for token transformation.
//!
//! Filters receive the stream produced by the tokenizer (or by the previous
//! filter) and produce a new one. They compose by plain sequencing, in the
//! order an analyzer lists them.
//!
//! # Available Filters
//!
//! - [`part_of_speech::PartOfSpeechStopFilter`] - Removes tokens by part-of-speech tag
//! - [`reading_form::ReadingFormFilter`] - Replaces text with the katakana or romaji reading
//! - [`katakana_stem::KatakanaStemFilter`] - Strips a trailing long-vowel mark
//! - [`stop::JapaneseStopFilter`] - Removes stop words
//! - [`base_form::BaseFormFilter`] - Replaces inflected forms with their base form
//! - [`keyword_marker::KeywordMarkerFilter`] - Protects tokens from rewriting
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::token::Token;
//! use kotodama::analysis::token_filter::Filter;
//! use kotodama::analysis::token_filter::katakana_stem::KatakanaStemFilter;
//!
//! let filter = KatakanaStemFilter::new();
//! let tokens = vec![Token::new("パーティー"), Token::new("コピー")];
//! let stemmed: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(stemmed[0].text, "パーティ");
//! assert_eq!(stemmed[1].text, "コピー");
//! ```
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Base Form → Part-of-Speech Stop → Stop Words → Katakana Stem → Index
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// All token filters must implement this trait to be used in the analysis
/// pipeline. The trait requires `Send + Sync` so one configured pipeline can
/// be shared by concurrent `analyze` calls.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use kotodama::analysis::token::TokenStream;
/// use kotodama::analysis::token_filter::Filter;
/// use kotodama::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         Ok(Box::new(tokens.map(|mut t| {
///             t.text = t.text.chars().rev().collect();
///             t
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual filter modules
pub mod base_form;
pub mod filtering;
pub mod katakana_stem;
pub mod keyword_marker;
pub mod lowercase;
pub mod part_of_speech;
pub mod reading_form;
pub mod stop;

// Re-export all filters for convenient access
pub use base_form::BaseFormFilter;
pub use katakana_stem::KatakanaStemFilter;
pub use keyword_marker::KeywordMarkerFilter;
pub use lowercase::LowercaseFilter;
pub use part_of_speech::PartOfSpeechStopFilter;
pub use reading_form::ReadingFormFilter;
pub use stop::JapaneseStopFilter;
