//! Keyword marker filter implementation.
//!
//! Marks tokens whose text is in a protected word set as keywords. Filters
//! that rewrite text (base form, reading form, katakana stemming) skip
//! keyword tokens, so protected words reach the index as written.
//!
//! # Examples
//!
//! ```
//! use kotodama::analysis::token::Token;
//! use kotodama::analysis::token_filter::Filter;
//! use kotodama::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
//!
//! let filter = KeywordMarkerFilter::from_words(vec!["サーバー"]);
//! let tokens = vec![Token::new("サーバー"), Token::new("パーティー")];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert!(result[0].keyword);
//! assert!(!result[1].keyword);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that flags protected words as keywords.
#[derive(Clone, Debug)]
pub struct KeywordMarkerFilter {
    keywords: Arc<HashSet<String>>,
}

impl KeywordMarkerFilter {
    pub fn with_keywords(keywords: HashSet<String>) -> Self {
        KeywordMarkerFilter {
            keywords: Arc::new(keywords),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_keywords(words.into_iter().map(|s| s.into()).collect())
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }
}

impl Filter for KeywordMarkerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let keywords = Arc::clone(&self.keywords);
        Ok(Box::new(tokens.map(move |mut token| {
            if keywords.contains(token.text.as_str()) {
                token.keyword = true;
            }
            token
        })))
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}
