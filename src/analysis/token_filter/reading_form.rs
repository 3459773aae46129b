//! Reading form filter implementation.
//!
//! Replaces the text of each token with its reading, either in katakana as
//! produced by the tokenizer or romanized. Tokens without a reading and
//! keyword tokens are left alone; offsets and position increments are never
//! touched.
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::token::Token;
//! use kotodama::analysis::token_filter::Filter;
//! use kotodama::analysis::token_filter::reading_form::ReadingFormFilter;
//!
//! let filter = ReadingFormFilter::new().use_romaji(true);
//! let tokens = vec![Token::new("今夜").with_reading("コンヤ")];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "kon'ya");
//! ```

use std::sync::Arc;

use crate::analysis::romanizer::{Romanizer, TableRomanizer};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that replaces token text with its reading.
#[derive(Clone)]
pub struct ReadingFormFilter {
    romanizer: Option<Arc<dyn Romanizer>>,
}

impl ReadingFormFilter {
    /// Create a filter emitting katakana readings.
    pub fn new() -> Self {
        ReadingFormFilter { romanizer: None }
    }

    /// Emit romanized readings with the default Hepburn table.
    pub fn use_romaji(self, use_romaji: bool) -> Self {
        if use_romaji {
            self.with_romanizer(Arc::new(TableRomanizer::default()))
        } else {
            ReadingFormFilter { romanizer: None }
        }
    }

    /// Emit readings romanized by a custom romanizer.
    pub fn with_romanizer(mut self, romanizer: Arc<dyn Romanizer>) -> Self {
        self.romanizer = Some(romanizer);
        self
    }

    pub fn is_romaji(&self) -> bool {
        self.romanizer.is_some()
    }
}

impl Default for ReadingFormFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReadingFormFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadingFormFilter")
            .field("use_romaji", &self.is_romaji())
            .finish()
    }
}

impl Filter for ReadingFormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let romanizer = self.romanizer.clone();
        Ok(Box::new(tokens.map(move |mut token| {
            if token.keyword {
                return token;
            }
            if let Some(reading) = token.reading.as_deref().filter(|r| !r.is_empty()) {
                token.text = match &romanizer {
                    Some(romanizer) => romanizer.romanize(reading),
                    None => reading.to_string(),
                };
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "kuromoji_readingform"
    }
}
