//! Katakana stem filter implementation.
//!
//! Normalizes loanword spelling variants by dropping one trailing long-vowel
//! mark (ー) from katakana tokens, so that "パーティー" and "パーティ" index
//! the same. Short words are left alone: "コピー" is a different word from
//! "コピ".

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{KotodamaError, Result};
use crate::util::script::{PROLONGED_SOUND_MARK, is_all_katakana};

/// Default minimum length, in characters, for a token to be stemmed.
pub const DEFAULT_MINIMUM_LENGTH: usize = 4;

/// A filter that strips a trailing long-vowel mark from katakana tokens.
#[derive(Clone, Copy, Debug)]
pub struct KatakanaStemFilter {
    minimum_length: usize,
}

impl KatakanaStemFilter {
    /// Create a new filter with the default minimum length of 4.
    pub fn new() -> Self {
        KatakanaStemFilter {
            minimum_length: DEFAULT_MINIMUM_LENGTH,
        }
    }

    /// Create a filter with a custom minimum length (counting the mark).
    pub fn with_minimum_length(minimum_length: usize) -> Result<Self> {
        if minimum_length < 1 {
            return Err(KotodamaError::invalid_config(
                "minimum_length",
                "must be at least 1",
            ));
        }
        Ok(KatakanaStemFilter { minimum_length })
    }

    pub fn minimum_length(&self) -> usize {
        self.minimum_length
    }

    /// Stem a single surface form. Returns `None` when it is left unchanged.
    pub fn stem(&self, text: &str) -> Option<String> {
        if !text.ends_with(PROLONGED_SOUND_MARK)
            || text.chars().count() < self.minimum_length
            || !is_all_katakana(text)
        {
            return None;
        }
        let mut stemmed = text.to_string();
        stemmed.pop();
        Some(stemmed)
    }

    fn stem_token(&self, mut token: Token) -> Token {
        if !token.keyword
            && let Some(stemmed) = self.stem(&token.text)
        {
            token.text = stemmed;
        }
        token
    }
}

impl Default for KatakanaStemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for KatakanaStemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filter = *self;
        Ok(Box::new(tokens.map(move |token| filter.stem_token(token))))
    }

    fn name(&self) -> &'static str {
        "kuromoji_stemmer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stem_all(filter: &KatakanaStemFilter, texts: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = texts.iter().map(|t| Token::new(*t)).collect();
        filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_default_minimum_length() {
        let filter = KatakanaStemFilter::new();
        assert_eq!(
            stem_all(&filter, &["パーティー", "コピー", "サーバー"]),
            vec!["パーティ", "コピー", "サーバ"]
        );
    }

    #[test]
    fn test_custom_minimum_length() {
        let filter = KatakanaStemFilter::with_minimum_length(6).unwrap();
        assert_eq!(stem_all(&filter, &["パーティー"]), vec!["パーティー"]);

        let filter = KatakanaStemFilter::with_minimum_length(3).unwrap();
        assert_eq!(stem_all(&filter, &["コピー"]), vec!["コピ"]);
    }

    #[test]
    fn test_no_cascade() {
        let filter = KatakanaStemFilter::new();
        assert_eq!(stem_all(&filter, &["スーパーー"]), vec!["スーパー"]);
    }

    #[test]
    fn test_non_katakana_untouched() {
        let filter = KatakanaStemFilter::new();
        assert_eq!(
            stem_all(&filter, &["らーめんー", "ABCー", "パーティ", "明後日"]),
            vec!["らーめんー", "ABCー", "パーティ", "明後日"]
        );
    }

    #[test]
    fn test_one_to_one() {
        let filter = KatakanaStemFilter::new();
        let tokens = vec![
            Token::with_offsets("パーティー", 9, 24).with_position_increment(2),
            Token::with_offsets("サーバー", 24, 36).as_keyword(),
        ];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "パーティ");
        assert_eq!((result[0].start_offset, result[0].end_offset), (9, 24));
        assert_eq!(result[0].position_increment, 2);
        assert_eq!(result[1].text, "サーバー");
    }

    #[test]
    fn test_invalid_minimum_length() {
        let err = KatakanaStemFilter::with_minimum_length(0).unwrap_err();
        assert_eq!(err.option(), Some("minimum_length"));
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(KatakanaStemFilter::new().name(), "kuromoji_stemmer");
    }
}
